// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::net::TcpStream;

use anyhow::Context;
use obex_rs::{
    cfg::{config::Config, logger},
    client::Client,
    header::{Header, HeaderValue},
    sync_adapter::drive_client,
};
use tracing::{info, warn};

/// Upper bound on reconnect attempts when `AutoReconnect` is enabled, so a
/// permanently unreachable peer doesn't spin the demo binary forever.
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// A minimal demo: connects, lists the root folder with `get`, then
/// disconnects. Exercises the client state machine against a real peer over
/// TCP (most OBEX deployments tunnel over RFCOMM/L2CAP instead, but the
/// protocol core is transport-agnostic either way).
fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config/obex.yaml".to_string());
    let logger_config_path = args.next().unwrap_or_else(|| "config/logging.yaml".to_string());

    let _guard = logger::init_logger(&logger_config_path).context("failed to initialize logger")?;
    let cfg = Config::load_from_file(&config_path).context("failed to load config")?;

    let mut attempt = 0;
    loop {
        attempt += 1;
        match run_session(&cfg) {
            Ok(()) => return Ok(()),
            Err(e) if cfg.runtime.auto_reconnect.as_bool() && attempt < MAX_RECONNECT_ATTEMPTS => {
                warn!(attempt, error = %e, "session failed, reconnecting");
            },
            Err(e) => return Err(e),
        }
    }
}

/// Runs a single connect/get/disconnect exchange against the configured
/// peer, end to end.
fn run_session(cfg: &Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", cfg.session.target.address, cfg.session.target.port);
    info!(%addr, "connecting");
    let mut stream = TcpStream::connect(&addr).context("tcp connect failed")?;
    stream.set_nodelay(true).ok();

    let mut client = Client::new();

    let connect_headers = if cfg.session.who.is_empty() {
        Vec::new()
    } else {
        vec![Header::named("Who", HeaderValue::Bytes(cfg.session.who.clone().into_bytes()))?]
    };
    let (_, request) = client.connect(&connect_headers)?;
    drive_client(&mut stream, &mut client, &request, cfg.runtime.timeout_io)?;
    info!(connected = client.conn.connected, connection_id = ?client.conn.connection_id, "connect complete");

    let (_, request) = client.get(&[Header::named("Name", HeaderValue::Unicode(String::new()))?])?;
    drive_client(&mut stream, &mut client, &request, cfg.runtime.timeout_io)?;
    for body in client.bodies() {
        info!(len = body.len(), "received body fragment");
    }

    let (_, request) = client.disconnect(&[])?;
    drive_client(&mut stream, &mut client, &request, cfg.runtime.timeout_io)?;
    info!("disconnected");

    Ok(())
}
