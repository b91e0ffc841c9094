// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! OBEX packet framing: `opcode/status byte | u16_be length | fixed fields |
//! header list`. The declared length covers the whole packet, including
//! these first three bytes.

use core::{fmt, mem::size_of};

use bitflags::bitflags;
use zerocopy::{byteorder::U16, BigEndian, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    error::{ObexError, Result},
    header::{self, Header},
    opcode::{Opcode, RawOpcode},
    wire::{read_u16_be, write_u16_be},
};

/// Minimum length of any valid packet: the three framing bytes alone.
pub const MIN_PACKET_LEN: usize = 3;

bitflags! {
    /// `setpath` request flag bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SetPathFlags: u8 {
        /// Go to the parent folder before applying the name header.
        const PARENT = 0b0000_0001;
        /// Do not create the folder if it does not already exist.
        const NO_CREATE = 0b0000_0010;
    }
}

/// Zero-copy, wire-safe view of the `setpath` flags byte.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct RawSetPathFlags(u8);

impl RawSetPathFlags {
    pub const fn from_raw(v: u8) -> Self {
        Self(v)
    }

    pub const fn raw(&self) -> u8 {
        self.0
    }

    pub fn flags(&self) -> SetPathFlags {
        SetPathFlags::from_bits_truncate(self.0)
    }

    pub fn set_flags(&mut self, flags: SetPathFlags) {
        self.0 = flags.bits();
    }
}

impl fmt::Debug for RawSetPathFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawSetPathFlags").field(&self.flags()).finish()
    }
}

/// Fixed fields carried by `connect` packets (request and response share the
/// same shape).
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct ConnectFields {
    pub version: u8,
    pub flags: u8,
    pub max_packet_len: U16<BigEndian>,
}

impl fmt::Debug for ConnectFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectFields")
            .field("version", &format_args!("0x{:02x}", self.version))
            .field("flags", &self.flags)
            .field("max_packet_len", &self.max_packet_len.get())
            .finish()
    }
}

/// Fixed fields carried by `setpath` request packets.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct SetPathFields {
    pub flags: RawSetPathFlags,
    pub constants: u8,
}

/// The per-opcode fixed-field block, if any, carried right after the
/// length prefix and before the header list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixedFields {
    Connect(ConnectFields),
    SetPath(SetPathFields),
    Empty,
}

impl FixedFields {
    pub fn encode(&self) -> Vec<u8> {
        match self {
            FixedFields::Connect(f) => f.as_bytes().to_vec(),
            FixedFields::SetPath(f) => f.as_bytes().to_vec(),
            FixedFields::Empty => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FixedFields::Connect(_) => size_of::<ConnectFields>(),
            FixedFields::SetPath(_) => size_of::<SetPathFields>(),
            FixedFields::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How many fixed-field bytes a request of the given opcode carries.
pub fn fixed_len_for_opcode(op: Opcode) -> usize {
    match op {
        Opcode::Connect => size_of::<ConnectFields>(),
        Opcode::SetPath => size_of::<SetPathFields>(),
        _ => 0,
    }
}

fn decode_fixed_for_opcode(op: Opcode, buf: &[u8]) -> Result<FixedFields> {
    match op {
        Opcode::Connect => {
            let f = ConnectFields::read_from_bytes(buf)
                .map_err(|_| ObexError::Decode("truncated connect fixed fields".into()))?;
            Ok(FixedFields::Connect(f))
        },
        Opcode::SetPath => {
            let f = SetPathFields::read_from_bytes(buf)
                .map_err(|_| ObexError::Decode("truncated setpath fixed fields".into()))?;
            Ok(FixedFields::SetPath(f))
        },
        _ => Ok(FixedFields::Empty),
    }
}

/// A fully decoded packet: the framing byte, its fixed fields (if any for
/// this opcode), and the header list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub code: RawOpcode,
    pub fixed: FixedFields,
    pub headers: Vec<Header>,
}

impl Packet {
    pub fn is_final(&self) -> bool {
        self.code.is_final()
    }

    /// Encodes this packet to its wire bytes, including the 3-byte prefix.
    pub fn encode(&self) -> Vec<u8> {
        let fixed_bytes = self.fixed.encode();
        let header_bytes = header::encode_all(&self.headers);
        let total = MIN_PACKET_LEN + fixed_bytes.len() + header_bytes.len();
        let mut out = Vec::with_capacity(total);
        out.push(self.code.raw());
        write_u16_be(&mut out, total as u16);
        out.extend_from_slice(&fixed_bytes);
        out.extend_from_slice(&header_bytes);
        out
    }

    /// Decodes a request packet, inferring its fixed-field shape from the
    /// opcode in the framing byte.
    pub fn decode_request(buf: &[u8]) -> Result<Packet> {
        let declared = probe_len(buf)?;
        if buf.len() < declared as usize {
            return Err(ObexError::Incomplete(format!(
                "packet declares {declared} bytes, have {}",
                buf.len()
            )));
        }
        let code = RawOpcode::from_raw(buf[0]);
        let op = code
            .opcode_known()
            .ok_or(ObexError::Decode(format!("unknown request opcode 0x{:02x}", code.code())))?;
        Self::decode_body(code, op, &buf[..declared as usize])
    }

    /// Decodes a response packet. The caller must supply which request
    /// opcode is outstanding, since the status byte alone does not name it.
    pub fn decode_response(buf: &[u8], request_op: Opcode) -> Result<Packet> {
        let declared = probe_len(buf)?;
        if buf.len() < declared as usize {
            return Err(ObexError::Incomplete(format!(
                "packet declares {declared} bytes, have {}",
                buf.len()
            )));
        }
        let code = RawOpcode::from_raw(buf[0]);
        Self::decode_body(code, request_op, &buf[..declared as usize])
    }

    fn decode_body(code: RawOpcode, op: Opcode, whole: &[u8]) -> Result<Packet> {
        let fixed_len = fixed_len_for_opcode(op);
        let rest = &whole[MIN_PACKET_LEN..];
        if rest.len() < fixed_len {
            return Err(ObexError::Decode("packet shorter than its fixed fields".into()));
        }
        let fixed = decode_fixed_for_opcode(op, &rest[..fixed_len])?;
        let headers = header::decode_all(&rest[fixed_len..])?;
        Ok(Packet { code, fixed, headers })
    }
}

/// Assembles a packet directly from pre-encoded header blobs, without
/// round-tripping through [`Header`]. Used by the client/server state
/// machines, which queue headers as already-encoded bytes so they can be
/// measured and popped cheaply while fitting them to the negotiated packet
/// size.
pub fn assemble(code: RawOpcode, fixed: &FixedFields, header_blobs: &[Vec<u8>]) -> Vec<u8> {
    let fixed_bytes = fixed.encode();
    let header_len: usize = header_blobs.iter().map(Vec::len).sum();
    let total = MIN_PACKET_LEN + fixed_bytes.len() + header_len;
    let mut out = Vec::with_capacity(total);
    out.push(code.raw());
    write_u16_be(&mut out, total as u16);
    out.extend_from_slice(&fixed_bytes);
    for blob in header_blobs {
        out.extend_from_slice(blob);
    }
    out
}

/// Reads the declared total length from the first three bytes of `buf`.
pub fn probe_len(buf: &[u8]) -> Result<u16> {
    if buf.len() < MIN_PACKET_LEN {
        return Err(ObexError::Incomplete("need 3 bytes to read packet length".into()));
    }
    read_u16_be(&buf[1..3])
}

/// Whether `buf` holds at least as many bytes as the packet it starts with
/// declares.
pub fn is_complete(buf: &[u8]) -> bool {
    match probe_len(buf) {
        Ok(len) => buf.len() >= len as usize,
        Err(_) => false,
    }
}
