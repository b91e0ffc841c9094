// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use thiserror::Error;

/// Errors surfaced by the header/packet codec and the client/server state
/// machines.
///
/// Variants line up with the taxonomy the state machines reason about:
/// a caller can match on the variant to decide whether `clear()` or
/// `reset()` is the right recovery step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObexError {
    /// The buffer does not yet contain a whole packet/header; the caller
    /// should read more bytes and retry, not treat this as fatal.
    #[error("incomplete: {0}")]
    Incomplete(String),

    /// The bytes present are not a valid encoding (bad length field,
    /// truncated UTF-16BE, unknown opcode on a context that requires a
    /// known one, ...).
    #[error("decode error: {0}")]
    Decode(String),

    /// Peer violated the protocol state machine (unexpected opcode, missing
    /// final bit, CONTINUE received on a non-continuable op, oversized
    /// packet, ...).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Caller misused the API (issued a request while busy, supplied
    /// headers to an op that cannot carry them, connect called twice, ...).
    #[error("usage error: {0}")]
    Usage(String),

    /// A single header or fixed field cannot fit within the negotiated
    /// maximum packet length.
    #[error("capacity error: {0}")]
    Capacity(String),

    /// Operation is recognized but intentionally not implemented by this
    /// engine.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, ObexError>;
