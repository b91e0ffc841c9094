// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Drives the sans-I/O client/server state machines against a blocking
//! [`Transport`], so callers never have to hand-write a read/decode/write
//! loop themselves.

use std::time::Duration;

use bytes::BytesMut;
use tracing::{debug, trace};

use crate::{
    client::Client,
    connection::Action,
    error::{ObexError, Result},
    opcode::Opcode,
    server::{Server, ServerEvent},
    transport::Transport,
    utils::HexPreview,
};

const READ_CHUNK: usize = 4096;

fn io_err(label: &'static str, e: std::io::Error) -> ObexError {
    ObexError::Protocol(format!("{label}: {e}"))
}

/// Writes `request`, then reads and feeds responses into `client` until the
/// exchange reaches `Done` or `Failed`. Leaves `client` in the `Streaming`
/// state (returning `Ok(())`) if the peer asked for more outgoing data via
/// `Writable`; the caller drives further `put_stream` calls itself.
///
/// The transport's read timeout is restored to its prior value on every
/// exit path.
pub fn drive_client(transport: &mut dyn Transport, client: &mut Client, request: &[u8], io_timeout: Duration) -> Result<()> {
    transport.set_read_timeout(Some(io_timeout)).map_err(|e| io_err("set_read_timeout", e))?;
    let result = drive_client_inner(transport, client, request);
    let _ = transport.set_read_timeout(None);
    result
}

fn drive_client_inner(transport: &mut dyn Transport, client: &mut Client, request: &[u8]) -> Result<()> {
    transport.write_all(request).map_err(|e| io_err("write request", e))?;
    let mut scratch = BytesMut::zeroed(READ_CHUNK);

    loop {
        let n = transport.read(&mut scratch).map_err(|e| io_err("read response", e))?;
        if n == 0 {
            client.conn.fail("peer closed the connection mid-exchange");
            return Err(ObexError::Protocol("peer closed the connection mid-exchange".into()));
        }
        trace!(bytes = n, preview = %HexPreview::new(&scratch[..n], 16), "read from transport");
        let (action, outgoing) = client.input(&scratch[..n]);
        if !outgoing.is_empty() {
            transport.write_all(&outgoing).map_err(|e| io_err("write continuation", e))?;
        }
        match action {
            Action::Continue => continue,
            Action::Done => {
                debug!("client exchange complete");
                return Ok(());
            },
            Action::Writable => return Ok(()),
            Action::Failed => {
                return Err(ObexError::Protocol(
                    client.conn.error_message.clone().unwrap_or_else(|| "request failed".into()),
                ));
            },
        }
    }
}

/// Reads one whole request into `server`, invoking `handle` once the final
/// packet arrives. `handle` must call `server.respond`/`respond_content`
/// and return the resulting bytes, which are then written back to the peer.
pub fn serve_one(
    transport: &mut dyn Transport,
    server: &mut Server,
    io_timeout: Duration,
    handle: impl FnOnce(&mut Server, Opcode) -> Result<Vec<u8>>,
) -> Result<()> {
    transport.set_read_timeout(Some(io_timeout)).map_err(|e| io_err("set_read_timeout", e))?;
    let result = serve_one_inner(transport, server, handle);
    let _ = transport.set_read_timeout(None);
    result
}

fn serve_one_inner(
    transport: &mut dyn Transport,
    server: &mut Server,
    handle: impl FnOnce(&mut Server, Opcode) -> Result<Vec<u8>>,
) -> Result<()> {
    let mut scratch = BytesMut::zeroed(READ_CHUNK);
    let mut handle = Some(handle);

    loop {
        let n = transport.read(&mut scratch).map_err(|e| io_err("read request", e))?;
        if n == 0 {
            return Err(ObexError::Protocol("peer closed the connection mid-request".into()));
        }
        trace!(bytes = n, preview = %HexPreview::new(&scratch[..n], 16), "read from transport");
        let (event, ack) = server.input(&scratch[..n]);
        if !ack.is_empty() {
            transport.write_all(&ack).map_err(|e| io_err("write continue ack", e))?;
        }
        match event {
            ServerEvent::NeedMoreData => continue,
            ServerEvent::RequestReady(op) => {
                let handler = handle.take().ok_or_else(|| ObexError::Usage("serve_one invoked twice".into()))?;
                let response = handler(server, op)?;
                transport.write_all(&response).map_err(|e| io_err("write response", e))?;
                return Ok(());
            },
            ServerEvent::Failed => {
                return Err(ObexError::Protocol(
                    server.conn.error_message.clone().unwrap_or_else(|| "request failed".into()),
                ));
            },
        }
    }
}
