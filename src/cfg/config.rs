// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::cfg::enums::YesNo;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Parameters that shape how `connect` is negotiated and how the demo
    /// binary reaches a peer.
    pub session: SessionConfig,
    /// Implementation/runtime parameters that live outside the protocol
    /// itself.
    pub runtime: RuntimeConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
/// Connection-level negotiation settings.
pub struct SessionConfig {
    /// Locally kept hints for reaching the peer; never sent on the wire.
    pub target: TargetHints,
    #[serde(rename = "MaxPacketLength")]
    /// Packet size the client proposes during `connect`.
    pub max_packet_len: u16,
    #[serde(default, rename = "Who")]
    /// Optional client identity advertised via the `Who` header.
    pub who: String,
}

/// Transport hints that are stored locally but never sent over the wire.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct TargetHints {
    #[serde(default, rename = "Address")]
    /// Peer address the demo binary connects to.
    pub address: String,
    #[serde(default, rename = "Port")]
    /// Peer TCP port.
    pub port: u16,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
/// Runtime-only settings that do not map to wire keys.
pub struct RuntimeConfig {
    #[serde(rename = "TimeoutConnection", with = "serde_secs")]
    /// Timeout for establishing the TCP connection.
    pub timeout_connection: Duration,
    #[serde(rename = "TimeoutIo", with = "serde_secs")]
    /// Per-call read/write timeout enforced by the synchronous completion
    /// adapter.
    pub timeout_io: Duration,
    #[serde(rename = "AutoReconnect")]
    /// Whether the demo binary should reconnect after a failed exchange.
    pub auto_reconnect: YesNo,
}

impl Config {
    /// Loads the configuration from YAML, validates it, and returns the
    /// ready-to-use value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let mut cfg: Config = serde_yaml::from_str(&s).context("failed to parse config YAML")?;
        cfg.validate_and_normalize()?;
        Ok(cfg)
    }

    /// Validates invariants the wire format itself does not enforce.
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        ensure!(
            self.session.max_packet_len >= 255,
            "MaxPacketLength must be >= 255 per OBEX minimum packet size"
        );
        ensure!(
            !self.runtime.timeout_connection.is_zero(),
            "TimeoutConnection must be > 0"
        );
        ensure!(!self.runtime.timeout_io.is_zero(), "TimeoutIo must be > 0");
        Ok(())
    }
}

/// Serde helpers for representing `Duration` as a number of seconds.
mod serde_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            session: SessionConfig {
                target: TargetHints { address: "127.0.0.1".into(), port: 650 },
                max_packet_len: 4096,
                who: String::new(),
            },
            runtime: RuntimeConfig {
                timeout_connection: Duration::from_secs(5),
                timeout_io: Duration::from_secs(5),
                auto_reconnect: YesNo::No,
            },
        }
    }

    #[test]
    fn rejects_max_packet_len_below_minimum() {
        let mut cfg = sample();
        cfg.session.max_packet_len = 64;
        assert!(cfg.validate_and_normalize().is_err());
    }

    #[test]
    fn rejects_zero_timeouts() {
        let mut cfg = sample();
        cfg.runtime.timeout_io = Duration::ZERO;
        assert!(cfg.validate_and_normalize().is_err());
    }

    #[test]
    fn accepts_well_formed_config() {
        assert!(sample().validate_and_normalize().is_ok());
    }
}
