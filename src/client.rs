// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Client-side request state machine: drives a single OBEX request from
//! the initial packet through any `CONTINUE` round trips to completion.


use tracing::{debug, trace};
use zerocopy::byteorder::U16;

use crate::{
    connection::{Action, ConnectionState, RequestState, State},
    error::{ObexError, Result},
    header::{Header, HeaderValue},
    opcode::{Opcode, RawOpcode, ResponseCode, StatusCategory},
    packet::{self, ConnectFields, FixedFields, Packet, RawSetPathFlags, SetPathFields, SetPathFlags, MIN_PACKET_LEN},
};

/// Options accepted by [`Client::setpath`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SetPathOptions {
    pub parent: bool,
    pub nocreate: bool,
}

/// Snapshot of the last response the client decoded, for application
/// inspection after an operation reaches `Done` or `Failed`.
#[derive(Debug, Clone, Default)]
pub struct ResponseDetail {
    pub status_raw: Option<u8>,
    pub status_name: Option<&'static str>,
    pub category: Option<StatusCategory>,
    pub error_message: Option<String>,
}

/// The client-side half of the OBEX protocol core.
#[derive(Debug)]
pub struct Client {
    pub conn: ConnectionState,
    request: Option<RequestState>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Client { conn: ConnectionState::new(), request: None }
    }

    /// Reinitializes the connection entirely (drops any in-flight request).
    pub fn reset(&mut self) {
        self.conn.reset();
        self.request = None;
    }

    /// Clears request-local error state, keeping connection identity
    /// intact, ready to accept a new request.
    pub fn clear(&mut self) {
        self.conn.clear();
        self.request = None;
    }

    pub fn state(&self) -> State {
        self.conn.state
    }

    /// Coarse status category of the last decoded response, if any.
    pub fn status(&self) -> Option<StatusCategory> {
        self.request
            .as_ref()
            .and_then(|r| r.latest_response.as_ref())
            .map(|p| StatusCategory::of(p.code.code()))
    }

    pub fn status_detail(&self) -> ResponseDetail {
        let mut detail = ResponseDetail { error_message: self.conn.error_message.clone(), ..Default::default() };
        if let Some(req) = &self.request
            && let Some(p) = &req.latest_response
        {
            detail.status_raw = Some(p.code.code());
            detail.category = Some(StatusCategory::of(p.code.code()));
            detail.status_name = p.code.response_known().map(response_name);
        }
        detail
    }

    pub fn response(&self) -> Option<&Packet> {
        self.request.as_ref().and_then(|r| r.latest_response.as_ref())
    }

    /// Concatenation of every `Body`/`EndOfBody` header value accumulated
    /// from the response(s) of the current or just-finished request.
    pub fn bodies(&self) -> Vec<Vec<u8>> {
        let Some(req) = &self.request else { return Vec::new() };
        req.headers_in
            .iter()
            .filter(|h| h.is_named("Body") || h.is_named("EndOfBody"))
            .filter_map(|h| match &h.value {
                HeaderValue::Bytes(b) => Some(b.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn headers(&self, name: &str) -> Vec<&Header> {
        match &self.request {
            Some(req) => crate::header::find_all(&req.headers_in, name),
            None => Vec::new(),
        }
    }

    fn begin(&mut self, op: Opcode) -> Result<()> {
        if self.conn.state != State::Idle {
            return Err(ObexError::Usage(format!(
                "cannot start {op:?}: a request is already outstanding"
            )));
        }
        self.conn.state = State::Busy;
        self.request = Some(RequestState::new(op));
        Ok(())
    }

    fn req_mut(&mut self) -> Result<&mut RequestState> {
        self.request
            .as_mut()
            .ok_or_else(|| ObexError::Usage("no request in progress".into()))
    }

    /// Builds one outgoing packet for the in-flight request, popping as
    /// many queued header blobs as fit after the `ConnectionId` header (if
    /// any). Implements the canonical outgoing-packet-construction
    /// algorithm.
    fn assemble_next_packet(
        conn: &ConnectionState,
        req: &mut RequestState,
        fixed: &FixedFields,
        force_final_when_empty: bool,
    ) -> Result<Vec<u8>> {
        let budget = (conn.max_packet_len as usize).saturating_sub(MIN_PACKET_LEN + fixed.len());
        let mut remaining = budget;
        let mut chosen: Vec<Vec<u8>> = Vec::new();

        if let Some(cid) = conn.connection_id_header_bytes() {
            if cid.len() > remaining {
                return Err(ObexError::Capacity(
                    "ConnectionId header does not fit the negotiated packet size".into(),
                ));
            }
            remaining -= cid.len();
            chosen.push(cid.to_vec());
        }

        let mut took_any = false;
        while let Some(len) = req.outgoing_headers.front().map(Vec::len) {
            if len > remaining {
                break;
            }
            if let Some(blob) = req.outgoing_headers.pop_front() {
                remaining -= blob.len();
                chosen.push(blob);
                took_any = true;
            }
        }
        if !took_any && !req.outgoing_headers.is_empty() {
            return Err(ObexError::Capacity(
                "a single header exceeds the negotiated packet size".into(),
            ));
        }

        let is_final = force_final_when_empty && req.outgoing_headers.is_empty() && !req.streaming;
        let code = RawOpcode::build(req.op as u8, is_final || req.op.always_final());
        trace!(op = ?req.op, is_final, remaining = remaining, "assembling outgoing packet");
        Ok(packet::assemble(code, fixed, &chosen))
    }

    fn queue_headers(req: &mut RequestState, headers: &[Header]) {
        for h in headers {
            req.outgoing_headers.push_back(h.encode());
        }
    }

    /// Assembles the next outgoing packet for the in-flight request. Takes
    /// a snapshot of `self.conn` so the borrow checker sees it as
    /// independent from the simultaneous mutable borrow of `self.request`.
    fn assemble_for_request(&mut self, fixed: &FixedFields, force_final: bool) -> Result<Vec<u8>> {
        let conn_snapshot = self.conn.clone();
        let req = self
            .request
            .as_mut()
            .ok_or_else(|| ObexError::Usage("no request in progress".into()))?;
        Self::assemble_next_packet(&conn_snapshot, req, fixed, force_final)
    }

    fn queue_body_for_request(&mut self, content: &[u8], name: &str) -> Result<()> {
        let conn_snapshot = self.conn.clone();
        let req = self
            .request
            .as_mut()
            .ok_or_else(|| ObexError::Usage("no request in progress".into()))?;
        queue_body_fragments(&conn_snapshot, req, content, name)
    }

    /// `connect` never spans multiple packets: every supplied header must
    /// fit alongside the fixed fields in one shot.
    pub fn connect(&mut self, headers: &[Header]) -> Result<(Action, Vec<u8>)> {
        if self.conn.connected {
            return Err(ObexError::Usage("already connected".into()));
        }
        self.begin(Opcode::Connect)?;
        let req = self.req_mut()?;
        Self::queue_headers(req, headers);
        let fixed = FixedFields::Connect(ConnectFields {
            version: 0x10,
            flags: 0,
            max_packet_len: U16::new(u16::MAX),
        });
        let bytes = self.assemble_for_request(&fixed, true)?;
        if let Some(req) = &self.request
            && !req.outgoing_headers.is_empty()
        {
            self.conn.fail("connect headers do not fit in a single packet");
            return Err(ObexError::Capacity("connect cannot span multiple packets".into()));
        }
        debug!("client: connect request sent");
        Ok((Action::Continue, bytes))
    }

    pub fn disconnect(&mut self, headers: &[Header]) -> Result<(Action, Vec<u8>)> {
        if !self.conn.connected {
            return Err(ObexError::Usage("not connected".into()));
        }
        self.begin(Opcode::Disconnect)?;
        let req = self.req_mut()?;
        Self::queue_headers(req, headers);
        let bytes = self.assemble_for_request(&FixedFields::Empty, true)?;
        if let Some(req) = &self.request
            && !req.outgoing_headers.is_empty()
        {
            return Err(ObexError::Capacity("disconnect cannot span multiple packets".into()));
        }
        self.conn.connected = false;
        Ok((Action::Continue, bytes))
    }

    /// Splits `content` into `Body` fragments sized to fit the negotiated
    /// packet, preceded by a `Length` header carrying the total size.
    pub fn put(&mut self, content: &[u8], headers: &[Header]) -> Result<(Action, Vec<u8>)> {
        self.begin(Opcode::Put)?;
        require_no_target_with_connection_id(&self.conn, headers)?;
        let req = self.req_mut()?;
        Self::queue_headers(req, headers);
        req.outgoing_headers.push_back(Header::named("Length", HeaderValue::U32(content.len() as u32))?.encode());
        self.queue_body_for_request(content, "Body")?;
        let bytes = self.assemble_for_request(&FixedFields::Empty, true)?;
        Ok((Action::Continue, bytes))
    }

    pub fn put_delete(&mut self, headers: &[Header]) -> Result<(Action, Vec<u8>)> {
        self.begin(Opcode::Put)?;
        require_no_target_with_connection_id(&self.conn, headers)?;
        let req = self.req_mut()?;
        Self::queue_headers(req, headers);
        let bytes = self.assemble_for_request(&FixedFields::Empty, true)?;
        Ok((Action::Continue, bytes))
    }

    /// Starts or continues a streaming `put`. The first call may carry
    /// `headers`; later calls must not. An empty `chunk` terminates the
    /// stream with an (possibly empty) `EndOfBody` header.
    pub fn put_stream(&mut self, chunk: &[u8], headers: &[Header]) -> Result<(Action, Vec<u8>)> {
        let starting = self.request.is_none();
        if starting {
            self.begin(Opcode::Put)?;
            require_no_target_with_connection_id(&self.conn, headers)?;
            let req = self.req_mut()?;
            req.streaming = true;
            Self::queue_headers(req, headers);
        } else {
            if !headers.is_empty() {
                return Err(ObexError::Usage(
                    "put_stream headers may only be supplied on the first call".into(),
                ));
            }
            if self.conn.state != State::Streaming {
                return Err(ObexError::Usage("put_stream called while not in Streaming state".into()));
            }
            self.conn.state = State::Busy;
        }

        if chunk.is_empty() {
            let req = self.req_mut()?;
            req.streaming = false;
            req.outgoing_headers.push_back(Header::named("EndOfBody", HeaderValue::Bytes(Vec::new()))?.encode());
        } else {
            self.queue_body_for_request(chunk, "Body")?;
        }
        let force_final = !self.req_mut()?.streaming;
        let bytes = self.assemble_for_request(&FixedFields::Empty, force_final)?;
        Ok((Action::Continue, bytes))
    }

    pub fn get(&mut self, headers: &[Header]) -> Result<(Action, Vec<u8>)> {
        self.begin(Opcode::Get)?;
        require_no_target_with_connection_id(&self.conn, headers)?;
        let req = self.req_mut()?;
        Self::queue_headers(req, headers);
        let bytes = self.assemble_for_request(&FixedFields::Empty, true)?;
        Ok((Action::Continue, bytes))
    }

    pub fn abort(&mut self, headers: &[Header]) -> Result<(Action, Vec<u8>)> {
        self.begin(Opcode::Abort)?;
        let req = self.req_mut()?;
        Self::queue_headers(req, headers);
        let bytes = self.assemble_for_request(&FixedFields::Empty, true)?;
        if let Some(req) = &self.request
            && !req.outgoing_headers.is_empty()
        {
            return Err(ObexError::Capacity("abort cannot span multiple packets".into()));
        }
        Ok((Action::Continue, bytes))
    }

    pub fn setpath(&mut self, headers: &[Header], opts: SetPathOptions) -> Result<(Action, Vec<u8>)> {
        self.begin(Opcode::SetPath)?;
        let req = self.req_mut()?;
        Self::queue_headers(req, headers);
        let mut raw = RawSetPathFlags::from_raw(0);
        let mut flags = SetPathFlags::empty();
        if opts.parent {
            flags |= SetPathFlags::PARENT;
        }
        if opts.nocreate {
            flags |= SetPathFlags::NO_CREATE;
        }
        raw.set_flags(flags);
        let fixed = FixedFields::SetPath(SetPathFields { flags: raw, constants: 0 });
        let bytes = self.assemble_for_request(&fixed, true)?;
        if let Some(req) = &self.request
            && !req.outgoing_headers.is_empty()
        {
            return Err(ObexError::Capacity("setpath cannot span multiple packets".into()));
        }
        Ok((Action::Continue, bytes))
    }

    pub fn session(&mut self, _headers: &[Header]) -> Result<(Action, Vec<u8>)> {
        Err(ObexError::Unsupported("reliable-session is not implemented".into()))
    }

    /// Feeds received bytes into the client, decoding and dispatching
    /// whatever whole response packets they complete.
    pub fn input(&mut self, bytes: &[u8]) -> (Action, Vec<u8>) {
        let Some(mut req) = self.request.take() else {
            self.conn.fail("input received with no request in progress");
            return (Action::Failed, Vec::new());
        };
        req.input_buf.extend_from_slice(bytes);

        if !packet::is_complete(&req.input_buf) {
            self.request = Some(req);
            return (Action::Continue, Vec::new());
        }

        let declared = match packet::probe_len(&req.input_buf) {
            Ok(l) => l as usize,
            Err(_) => {
                self.request = Some(req);
                return (Action::Continue, Vec::new());
            },
        };
        let op = req.op;
        let parsed = Packet::decode_response(&req.input_buf, op);
        req.input_buf.drain(0..declared);

        let packet = match parsed {
            Ok(p) => p,
            Err(e) => {
                self.conn.fail(format!("decode error: {e}"));
                self.request = None;
                return (Action::Failed, Vec::new());
            },
        };

        req.headers_in.extend(packet.headers.clone());
        let is_final = packet.is_final();
        let is_continue = packet.code.code() == ResponseCode::Continue as u8;
        req.latest_response = Some(packet.clone());

        self.dispatch_response(req, op, &packet, is_final, is_continue)
    }

    fn dispatch_response(
        &mut self,
        mut req: RequestState,
        op: Opcode,
        packet: &Packet,
        is_final: bool,
        is_continue: bool,
    ) -> (Action, Vec<u8>) {
        match op {
            Opcode::Connect => {
                if is_continue {
                    self.conn.fail("CONTINUE packet received for Connect request");
                    self.request = None;
                    (Action::Failed, Vec::new())
                } else if is_final {
                    if packet.code.code() == ResponseCode::Ok as u8 {
                        self.conn.connected = true;
                        if let FixedFields::Connect(f) = &packet.fixed {
                            let peer_max = f.max_packet_len.get();
                            if peer_max > self.conn.max_packet_len {
                                self.conn.max_packet_len = peer_max;
                            }
                        }
                        if let Some(h) = crate::header::find(&packet.headers, "ConnectionId")
                            && let HeaderValue::U32(id) = &h.value
                        {
                            self.conn.set_connection_id(*id);
                        }
                    }
                    self.conn.state = State::Idle;
                    self.request = Some(req);
                    (Action::Done, Vec::new())
                } else {
                    self.conn.fail("non-final response received for Connect request");
                    self.request = None;
                    (Action::Failed, Vec::new())
                }
            },
            Opcode::Put | Opcode::Get => {
                if is_continue {
                    if !op.always_final() && !req.outgoing_headers.is_empty() {
                        let bytes = match Self::assemble_next_packet(&self.conn, &mut req, &FixedFields::Empty, true) {
                            Ok(b) => b,
                            Err(e) => {
                                self.conn.fail(e.to_string());
                                self.request = None;
                                return (Action::Failed, Vec::new());
                            },
                        };
                        self.request = Some(req);
                        (Action::Continue, bytes)
                    } else {
                        req.streaming = true;
                        self.conn.state = State::Streaming;
                        self.request = Some(req);
                        (Action::Writable, Vec::new())
                    }
                } else if is_final {
                    self.conn.state = State::Idle;
                    self.request = Some(req);
                    (Action::Done, Vec::new())
                } else {
                    self.conn
                        .fail("non-final, non-CONTINUE response received for put/get");
                    self.request = None;
                    (Action::Failed, Vec::new())
                }
            },
            Opcode::Disconnect | Opcode::SetPath | Opcode::Abort => {
                if is_continue {
                    self.conn.fail(format!("CONTINUE packet received for {op:?} request"));
                    self.request = None;
                    (Action::Failed, Vec::new())
                } else if is_final {
                    if op == Opcode::Disconnect {
                        self.conn.connected = false;
                        self.conn.clear_connection_id();
                    }
                    self.conn.state = State::Idle;
                    self.request = Some(req);
                    (Action::Done, Vec::new())
                } else {
                    self.conn.fail(format!("non-final response received for {op:?} request"));
                    self.request = None;
                    (Action::Failed, Vec::new())
                }
            },
            Opcode::Session => {
                self.conn.fail("session op is unsupported");
                self.request = None;
                (Action::Failed, Vec::new())
            },
        }
    }
}

fn require_no_target_with_connection_id(conn: &ConnectionState, headers: &[Header]) -> Result<()> {
    if conn.connection_id.is_some() && headers.iter().any(|h| h.is_named("Target")) {
        return Err(ObexError::Usage(
            "Target and ConnectionId headers must not appear in the same request".into(),
        ));
    }
    Ok(())
}

/// Splits `content` into one or more `name`-mnemonic byte headers, each
/// small enough to ever fit in a packet once framing and the connection id
/// are accounted for, and pushes them onto the request's outgoing queue.
fn queue_body_fragments(
    conn: &ConnectionState,
    req: &mut RequestState,
    content: &[u8],
    name: &str,
) -> Result<()> {
    let cid_len = conn.connection_id_header_bytes().map(<[u8]>::len).unwrap_or(0);
    let overhead = MIN_PACKET_LEN + cid_len + 3;
    let budget = (conn.max_packet_len as usize).saturating_sub(overhead);
    if budget == 0 {
        return Err(ObexError::Capacity("negotiated packet size too small for any body fragment".into()));
    }
    for chunk in content.chunks(budget) {
        req.outgoing_headers.push_back(Header::named(name, HeaderValue::Bytes(chunk.to_vec()))?.encode());
    }
    Ok(())
}

fn response_name(code: ResponseCode) -> &'static str {
    match code {
        ResponseCode::Continue => "Continue",
        ResponseCode::Ok => "OK",
        ResponseCode::Created => "Created",
        ResponseCode::Accepted => "Accepted",
        ResponseCode::NonAuthoritativeInfo => "NonAuthoritativeInfo",
        ResponseCode::NoContent => "NoContent",
        ResponseCode::ResetContent => "ResetContent",
        ResponseCode::PartialContent => "PartialContent",
        ResponseCode::MultipleChoices => "MultipleChoices",
        ResponseCode::MovedPermanently => "MovedPermanently",
        ResponseCode::MovedTemporarily => "MovedTemporarily",
        ResponseCode::SeeOther => "SeeOther",
        ResponseCode::NotModified => "NotModified",
        ResponseCode::UseProxy => "UseProxy",
        ResponseCode::BadRequest => "BadRequest",
        ResponseCode::Unauthorized => "Unauthorized",
        ResponseCode::PaymentRequired => "PaymentRequired",
        ResponseCode::Forbidden => "Forbidden",
        ResponseCode::NotFound => "NotFound",
        ResponseCode::MethodNotAllowed => "MethodNotAllowed",
        ResponseCode::NotAcceptable => "NotAcceptable",
        ResponseCode::ProxyAuthenticationRequired => "ProxyAuthenticationRequired",
        ResponseCode::RequestTimeOut => "RequestTimeOut",
        ResponseCode::Conflict => "Conflict",
        ResponseCode::Gone => "Gone",
        ResponseCode::LengthRequired => "LengthRequired",
        ResponseCode::PreconditionFailed => "PreconditionFailed",
        ResponseCode::RequestedEntityTooLarge => "RequestedEntityTooLarge",
        ResponseCode::RequestUrlTooLarge => "RequestUrlTooLarge",
        ResponseCode::UnsupportedMediaType => "UnsupportedMediaType",
        ResponseCode::InternalServerError => "InternalServerError",
        ResponseCode::NotImplemented => "NotImplemented",
        ResponseCode::BadGateway => "BadGateway",
        ResponseCode::ServiceUnavailable => "ServiceUnavailable",
        ResponseCode::GatewayTimeout => "GatewayTimeout",
        ResponseCode::HttpVersionNotSupported => "HttpVersionNotSupported",
        ResponseCode::DatabaseFull => "DatabaseFull",
        ResponseCode::DatabaseLocked => "DatabaseLocked",
        ResponseCode::ProtocolError => "ProtocolError",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connect_ok_response(max_len: u16, connection_id: Option<u32>) -> Vec<u8> {
        let mut headers = Vec::new();
        if let Some(id) = connection_id {
            headers.push(Header::named("ConnectionId", HeaderValue::U32(id)).expect("valid header"));
        }
        let packet = Packet {
            code: RawOpcode::build(ResponseCode::Ok as u8, true),
            fixed: FixedFields::Connect(ConnectFields { version: 0x10, flags: 0, max_packet_len: U16::new(max_len) }),
            headers,
        };
        packet.encode()
    }

    #[test]
    fn connect_then_ok_completes() {
        let mut client = Client::new();
        let (action, _bytes) = client.connect(&[]).expect("connect begins");
        assert_eq!(action, Action::Continue);
        let (action, _) = client.input(&connect_ok_response(1024, None));
        assert_eq!(action, Action::Done);
        assert!(client.conn.connected);
        assert_eq!(client.conn.max_packet_len, 1024);
    }

    #[test]
    fn connect_persists_connection_id() {
        let mut client = Client::new();
        client.connect(&[]).expect("connect begins");
        client.input(&connect_ok_response(1024, Some(0x2A)));
        assert_eq!(client.conn.connection_id, Some(0x2A));
    }

    #[test]
    fn cannot_connect_twice() {
        let mut client = Client::new();
        client.connect(&[]).expect("connect begins");
        client.input(&connect_ok_response(255, None));
        assert!(client.connect(&[]).is_err());
    }

    #[test]
    fn can_reconnect_after_disconnect() {
        let mut client = Client::new();
        client.connect(&[]).expect("connect begins");
        client.input(&connect_ok_response(255, None));
        client.disconnect(&[]).expect("disconnect begins");
        let ok = Packet { code: RawOpcode::build(ResponseCode::Ok as u8, true), fixed: FixedFields::Empty, headers: vec![] };
        client.input(&ok.encode());
        assert!(!client.conn.connected);
        assert!(client.connect(&[]).is_ok());
    }

    #[test]
    fn busy_state_rejects_new_request() {
        let mut client = Client::new();
        client.connect(&[]).expect("connect begins");
        assert!(client.get(&[]).is_err());
    }

    #[test]
    fn disconnect_requires_prior_connect() {
        let mut client = Client::new();
        assert!(client.disconnect(&[]).is_err());
    }

    #[test]
    fn put_get_rejects_continue_on_disconnect() {
        let mut client = Client::new();
        client.connect(&[]).expect("connect begins");
        client.input(&connect_ok_response(255, None));
        client.disconnect(&[]).expect("disconnect begins");
        let continue_packet =
            Packet { code: RawOpcode::build(ResponseCode::Continue as u8, false), fixed: FixedFields::Empty, headers: vec![] };
        let (action, _) = client.input(&continue_packet.encode());
        assert_eq!(action, Action::Failed);
        assert_eq!(client.conn.state, State::Error);
    }

    #[test]
    fn connect_rejects_continue_response() {
        let mut client = Client::new();
        client.connect(&[]).expect("connect begins");
        let continue_packet =
            Packet { code: RawOpcode::build(ResponseCode::Continue as u8, false), fixed: FixedFields::Empty, headers: vec![] };
        let (action, _) = client.input(&continue_packet.encode());
        assert_eq!(action, Action::Failed);
        assert_eq!(client.conn.state, State::Error);
        assert!(!client.conn.connected);
        assert!(client.conn.error_message.as_deref().unwrap().contains("CONTINUE packet received for Connect request"));
    }

    #[test]
    fn connect_rejects_non_final_non_continue_response() {
        let mut client = Client::new();
        client.connect(&[]).expect("connect begins");
        let bad = Packet {
            code: RawOpcode::build(ResponseCode::Ok as u8, false),
            fixed: FixedFields::Connect(ConnectFields { version: 0x10, flags: 0, max_packet_len: U16::new(255) }),
            headers: vec![],
        };
        let (action, _) = client.input(&bad.encode());
        assert_eq!(action, Action::Failed);
        assert!(!client.conn.connected);
    }

    #[test]
    fn session_is_always_unsupported() {
        let mut client = Client::new();
        assert!(client.session(&[]).is_err());
    }
}
