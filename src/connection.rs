// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Per-connection and per-request state shared by the client and server
//! state machines.

use std::collections::VecDeque;

use crate::{
    header::{Header, HeaderValue},
    opcode::Opcode,
    packet::Packet,
};

/// Default max packet length before any `connect` negotiation has taken
/// place.
pub const DEFAULT_MAX_PACKET_LEN: u16 = 255;

/// Coarse lifecycle state of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Busy,
    Streaming,
    Responding,
    Error,
}

/// Outcome of feeding bytes into, or driving, a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// More input is needed before anything else can happen.
    Continue,
    /// The current operation finished successfully.
    Done,
    /// The caller may push more outgoing data (streaming `put`).
    Writable,
    /// The operation failed; inspect `ConnectionState::error_message`.
    Failed,
}

/// Persistent, per-connection state: negotiated packet size, connection
/// identity, and the last error recorded.
#[derive(Debug, Clone)]
pub struct ConnectionState {
    pub state: State,
    pub max_packet_len: u16,
    pub connected: bool,
    pub connection_id: Option<u32>,
    connection_id_header: Option<Vec<u8>>,
    pub error_message: Option<String>,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionState {
    pub fn new() -> Self {
        ConnectionState {
            state: State::Idle,
            max_packet_len: DEFAULT_MAX_PACKET_LEN,
            connected: false,
            connection_id: None,
            connection_id_header: None,
            error_message: None,
        }
    }

    /// Reinitializes the whole connection, as if it had just been created.
    pub fn reset(&mut self) {
        *self = ConnectionState::new();
    }

    /// Clears request-local error state without tearing down the
    /// connection identity (used after a recoverable `Failed` action).
    pub fn clear(&mut self) {
        self.state = State::Idle;
        self.error_message = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = State::Error;
        self.error_message = Some(message.into());
    }

    /// Records a freshly minted/learned connection id and pre-encodes its
    /// wire header so every subsequent outgoing packet can cheaply prepend
    /// it.
    pub fn set_connection_id(&mut self, id: u32) {
        self.connection_id = Some(id);
        self.connection_id_header = Header::named("ConnectionId", HeaderValue::U32(id))
            .ok()
            .map(|h| h.encode());
    }

    pub fn clear_connection_id(&mut self) {
        self.connection_id = None;
        self.connection_id_header = None;
    }

    /// Pre-encoded `ConnectionId` header bytes, if one is set.
    pub fn connection_id_header_bytes(&self) -> Option<&[u8]> {
        self.connection_id_header.as_deref()
    }
}

/// Per-in-flight-request bookkeeping: which op is outstanding, the raw
/// input accumulator, the queue of still-to-send header blobs, and the
/// headers/response accumulated from the peer so far.
#[derive(Debug, Clone)]
pub struct RequestState {
    pub op: Opcode,
    pub input_buf: Vec<u8>,
    pub outgoing_headers: VecDeque<Vec<u8>>,
    pub headers_in: Vec<Header>,
    pub latest_response: Option<Packet>,
    pub streaming: bool,
}

impl RequestState {
    pub fn new(op: Opcode) -> Self {
        RequestState {
            op,
            input_buf: Vec::new(),
            outgoing_headers: VecDeque::new(),
            headers_in: Vec::new(),
            latest_response: None,
            streaming: false,
        }
    }
}
