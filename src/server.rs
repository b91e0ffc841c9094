// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Server-side response state machine: accumulates a (possibly
//! multi-packet) request, then lets the application answer it with
//! `respond`/`respond_content`.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use tracing::{trace, warn};
use zerocopy::byteorder::U16;

use crate::{
    connection::{ConnectionState, State, DEFAULT_MAX_PACKET_LEN},
    error::{ObexError, Result},
    header::{Header, HeaderValue},
    opcode::{Opcode, RawOpcode, ResponseCode},
    packet::{self, ConnectFields, FixedFields, Packet, MIN_PACKET_LEN},
};

/// Mints strictly increasing 32-bit connection ids. Meant to be shared
/// (via `Arc`) across every [`Server`] instance handling connections for
/// one responder, since the id space is a single process-wide sequence.
#[derive(Debug)]
pub struct ConnectionIdMinter {
    next: AtomicU32,
}

impl Default for ConnectionIdMinter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionIdMinter {
    pub fn new() -> Self {
        ConnectionIdMinter { next: AtomicU32::new(1) }
    }

    /// Mints the next id, failing rather than silently wrapping once the
    /// counter reaches `u32::MAX`.
    pub fn mint(&self) -> Result<u32> {
        loop {
            let current = self.next.load(Ordering::Relaxed);
            if current == u32::MAX {
                return Err(ObexError::Capacity("connection id counter exhausted".into()));
            }
            let proposed = current + 1;
            if self
                .next
                .compare_exchange(current, proposed, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return Ok(current);
            }
        }
    }
}

/// Outcome of feeding bytes into the server state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerEvent {
    /// More bytes are needed before the request is complete.
    NeedMoreData,
    /// The final packet of a request arrived; the application should call
    /// `respond`/`respond_content` for this opcode.
    RequestReady(Opcode),
    /// The exchange failed; see `ConnectionState::error_message`.
    Failed,
}

#[derive(Debug, Clone)]
struct PendingRequest {
    op: Opcode,
    headers_in: Vec<Header>,
    fixed: FixedFields,
}

/// The server-side half of the OBEX protocol core.
#[derive(Debug)]
pub struct Server {
    pub conn: ConnectionState,
    input_buf: Vec<u8>,
    pending: Option<PendingRequest>,
    minter: Arc<ConnectionIdMinter>,
}

impl Server {
    pub fn new(minter: Arc<ConnectionIdMinter>) -> Self {
        Server { conn: ConnectionState::new(), input_buf: Vec::new(), pending: None, minter }
    }

    pub fn reset(&mut self) {
        self.conn.reset();
        self.input_buf.clear();
        self.pending = None;
    }

    pub fn clear(&mut self) {
        self.conn.clear();
        self.pending = None;
    }

    pub fn headers(&self, name: &str) -> Vec<&Header> {
        match &self.pending {
            Some(p) => crate::header::find_all(&p.headers_in, name),
            None => Vec::new(),
        }
    }

    /// Concatenation of every accumulated `Body`/`EndOfBody` header value
    /// for the request currently awaiting a response.
    pub fn bodies(&self) -> Vec<Vec<u8>> {
        let Some(pending) = &self.pending else { return Vec::new() };
        pending
            .headers_in
            .iter()
            .filter(|h| h.is_named("Body") || h.is_named("EndOfBody"))
            .filter_map(|h| match &h.value {
                HeaderValue::Bytes(b) => Some(b.clone()),
                _ => None,
            })
            .collect()
    }

    /// Feeds received bytes in, decoding and accumulating whatever whole
    /// request packets they complete.
    pub fn input(&mut self, bytes: &[u8]) -> (ServerEvent, Vec<u8>) {
        if self.conn.state == State::Responding {
            self.conn.fail("received bytes while a response was still pending");
            return (ServerEvent::Failed, Vec::new());
        }

        self.input_buf.extend_from_slice(bytes);
        if !packet::is_complete(&self.input_buf) {
            return (ServerEvent::NeedMoreData, Vec::new());
        }

        let declared = match packet::probe_len(&self.input_buf) {
            Ok(l) => l as usize,
            Err(_) => return (ServerEvent::NeedMoreData, Vec::new()),
        };
        let parsed = Packet::decode_request(&self.input_buf);
        self.input_buf.drain(0..declared);

        let packet = match parsed {
            Ok(p) => p,
            Err(e) => {
                self.conn.fail(format!("decode error: {e}"));
                return (ServerEvent::Failed, Vec::new());
            },
        };
        let Some(op) = packet.code.opcode_known() else {
            self.conn.fail("unknown request opcode");
            return (ServerEvent::Failed, Vec::new());
        };

        if let Some(pending) = &self.pending
            && pending.op != op
        {
            self.conn.fail(format!("opcode changed mid-request: {:?} -> {op:?}", pending.op));
            self.pending = None;
            return (ServerEvent::Failed, Vec::new());
        }

        self.check_connection_id(&packet.headers);

        let pending = self.pending.get_or_insert_with(|| PendingRequest {
            op,
            headers_in: Vec::new(),
            fixed: packet.fixed.clone(),
        });
        pending.headers_in.extend(packet.headers.clone());

        if packet.is_final() {
            self.conn.state = State::Responding;
            trace!(?op, "request complete, awaiting response");
            (ServerEvent::RequestReady(op), Vec::new())
        } else {
            self.conn.state = State::Busy;
            let ack = packet::assemble(RawOpcode::build(ResponseCode::Continue as u8, false), &FixedFields::Empty, &[]);
            (ServerEvent::NeedMoreData, ack)
        }
    }

    /// A `ConnectionId` mismatch is recorded but never fatal, per this
    /// engine's lenience on stale/duplicated connection identifiers.
    fn check_connection_id(&self, headers: &[Header]) {
        let (Some(expected), Some(h)) = (self.conn.connection_id, crate::header::find(headers, "ConnectionId"))
        else {
            return;
        };
        if let HeaderValue::U32(got) = h.value
            && got != expected
        {
            warn!(expected, got, "ConnectionId mismatch on incoming request");
        }
    }

    /// Answers the request currently awaiting a response with `status` and
    /// no body. For `connect`, mints a connection id and negotiates the
    /// packet size; for `disconnect`, tears the connection id down.
    pub fn respond(&mut self, status: ResponseCode, headers: &[Header]) -> Result<Vec<u8>> {
        let Some(pending) = self.pending.take() else {
            return Err(ObexError::Usage("no request is awaiting a response".into()));
        };
        if self.conn.state != State::Responding {
            self.pending = Some(pending);
            return Err(ObexError::Usage("not in the response phase".into()));
        }

        let mut blobs: Vec<Vec<u8>> = headers.iter().map(Header::encode).collect();

        let fixed = match pending.op {
            Opcode::Connect => {
                let requested_max = match &pending.fixed {
                    FixedFields::Connect(f) => f.max_packet_len.get(),
                    _ => DEFAULT_MAX_PACKET_LEN,
                };
                if requested_max >= DEFAULT_MAX_PACKET_LEN {
                    self.conn.max_packet_len = requested_max;
                }
                let id = self.minter.mint()?;
                self.conn.set_connection_id(id);
                if let Some(cid_bytes) = self.conn.connection_id_header_bytes() {
                    blobs.insert(0, cid_bytes.to_vec());
                }
                FixedFields::Connect(ConnectFields {
                    version: 0x10,
                    flags: 0,
                    max_packet_len: U16::new(self.conn.max_packet_len),
                })
            },
            Opcode::Disconnect => {
                self.conn.clear_connection_id();
                self.conn.max_packet_len = DEFAULT_MAX_PACKET_LEN;
                FixedFields::Empty
            },
            _ => FixedFields::Empty,
        };

        let budget = (self.conn.max_packet_len as usize).saturating_sub(MIN_PACKET_LEN + fixed.len());
        let header_len: usize = blobs.iter().map(Vec::len).sum();
        if header_len > budget {
            self.conn
                .fail("response headers exceed the negotiated packet size (multi-packet responses are unsupported)");
            return Err(ObexError::Capacity(
                "response does not fit in a single packet".into(),
            ));
        }

        let code = RawOpcode::build(status as u8, true);
        let bytes = packet::assemble(code, &fixed, &blobs);
        self.conn.state = State::Idle;
        Ok(bytes)
    }

    /// Convenience over `respond` that attaches `content` as a single
    /// `EndOfBody` header.
    pub fn respond_content(&mut self, content: &[u8], status: ResponseCode, headers: &[Header]) -> Result<Vec<u8>> {
        let mut all = headers.to_vec();
        all.push(Header::named("EndOfBody", HeaderValue::Bytes(content.to_vec()))?);
        self.respond(status, &all)
    }
}
