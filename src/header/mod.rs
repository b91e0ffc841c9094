// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! OBEX header codec.
//!
//! Every header starts with a one-byte identifier whose top two bits pick
//! one of four value kinds:
//!
//! ```text
//! 00xxxxxx  Unicode string  (2-byte length prefix, UTF-16BE, NUL terminated)
//! 01xxxxxx  byte sequence   (2-byte length prefix)
//! 10xxxxxx  single byte
//! 11xxxxxx  4-byte unsigned integer
//! ```
//!
//! The length prefix, where present, counts the *whole* header including
//! the identifier and the length field itself.

pub mod app_params;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{
    error::{ObexError, Result},
    wire::{decode_utf16be, encode_utf16be_nul, read_u16_be, read_u32_be, write_u16_be, write_u32_be},
};

/// The decoded value carried by a header, tagged by which of the four wire
/// kinds produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Unicode(String),
    Bytes(Vec<u8>),
    U8(u8),
    U32(u32),
}

impl HeaderValue {
    fn kind(&self) -> HeaderKind {
        match self {
            HeaderValue::Unicode(_) => HeaderKind::Unicode,
            HeaderValue::Bytes(_) => HeaderKind::Bytes,
            HeaderValue::U8(_) => HeaderKind::U8,
            HeaderValue::U32(_) => HeaderKind::U32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Unicode,
    Bytes,
    U8,
    U32,
}

impl HeaderKind {
    pub fn of_id(id: u8) -> Self {
        match id >> 6 {
            0 => HeaderKind::Unicode,
            1 => HeaderKind::Bytes,
            2 => HeaderKind::U8,
            _ => HeaderKind::U32,
        }
    }
}

/// A single decoded/encodable OBEX header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: u8,
    pub name: String,
    pub value: HeaderValue,
}

/// Static mnemonic ↔ identifier table, Table 3-ish of the Generic Object
/// Exchange Profile.
static REGISTRY: &[(&str, u8)] = &[
    ("Count", 0xC0),
    ("Name", 0x01),
    ("Type", 0x42),
    ("Length", 0xC3),
    ("Timestamp", 0x44),
    ("Timestamp4", 0xC4),
    ("Target", 0x46),
    ("Http", 0x47),
    ("Body", 0x48),
    ("EndOfBody", 0x49),
    ("Who", 0x4A),
    ("ConnectionId", 0xCB),
    ("AppParameters", 0x4C),
    ("AuthChallenge", 0x4D),
    ("AuthResponse", 0x4E),
    ("CreatorId", 0xCF),
    ("WanUuid", 0x50),
    ("ObjectClass", 0x51),
    ("SessionParameters", 0x52),
    ("SessionSequenceNumber", 0x93),
    ("Description", 0x05),
];

static NAME_TO_ID: Lazy<HashMap<String, u8>> = Lazy::new(|| {
    REGISTRY
        .iter()
        .map(|(name, id)| (name.to_ascii_lowercase(), *id))
        .collect()
});

static ID_TO_NAME: Lazy<HashMap<u8, &'static str>> =
    Lazy::new(|| REGISTRY.iter().map(|(name, id)| (*id, *name)).collect());

/// Resolves a mnemonic header name to its wire identifier, case-insensitive.
pub fn id_of_name(name: &str) -> Option<u8> {
    NAME_TO_ID.get(&name.to_ascii_lowercase()).copied()
}

/// Resolves a wire identifier back to its canonical mnemonic, synthesizing
/// `Unknown0xNN` for identifiers absent from the registry.
pub fn name_of_id(id: u8) -> String {
    match ID_TO_NAME.get(&id) {
        Some(name) => name.to_string(),
        None => format!("Unknown0x{id:02X}"),
    }
}

impl Header {
    /// Builds a header from a registry mnemonic; fails if the name is
    /// unknown or the value's kind does not match the identifier's kind.
    pub fn named(name: &str, value: HeaderValue) -> Result<Self> {
        let id = id_of_name(name)
            .ok_or_else(|| ObexError::Usage(format!("unknown header name {name:?}")))?;
        Self::with_id(id, value)
    }

    /// Builds a header from an explicit identifier byte, validating that
    /// the supplied value matches the kind implied by the identifier's top
    /// two bits.
    pub fn with_id(id: u8, value: HeaderValue) -> Result<Self> {
        let expected = HeaderKind::of_id(id);
        if expected != value.kind() {
            return Err(ObexError::Usage(format!(
                "header 0x{id:02x} expects a {expected:?} value, got a {:?} value",
                value.kind()
            )));
        }
        Ok(Header { id, name: name_of_id(id), value })
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Encodes this header to its wire representation.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match &self.value {
            HeaderValue::Unicode(s) => {
                let body = encode_utf16be_nul(s);
                let total = 3 + body.len();
                out.push(self.id);
                write_u16_be(&mut out, total as u16);
                out.extend_from_slice(&body);
            },
            HeaderValue::Bytes(b) => {
                let total = 3 + b.len();
                out.push(self.id);
                write_u16_be(&mut out, total as u16);
                out.extend_from_slice(b);
            },
            HeaderValue::U8(v) => {
                out.push(self.id);
                out.push(*v);
            },
            HeaderValue::U32(v) => {
                out.push(self.id);
                write_u32_be(&mut out, *v);
            },
        }
        out
    }

    /// Decodes a single header starting at `buf[0]`, returning the header
    /// and the number of bytes it consumed.
    pub fn decode_one(buf: &[u8]) -> Result<(Header, usize)> {
        let id = *buf
            .first()
            .ok_or_else(|| ObexError::Incomplete("empty header buffer".into()))?;
        let kind = HeaderKind::of_id(id);
        match kind {
            HeaderKind::Unicode | HeaderKind::Bytes => {
                if buf.len() < 3 {
                    return Err(ObexError::Incomplete(
                        "need 3 bytes for header length prefix".into(),
                    ));
                }
                let total = read_u16_be(&buf[1..3])? as usize;
                let min = if kind == HeaderKind::Unicode { 5 } else { 3 };
                if total < min {
                    return Err(ObexError::Decode(format!(
                        "header 0x{id:02x} declares invalid length {total}"
                    )));
                }
                if buf.len() < total {
                    return Err(ObexError::Incomplete(format!(
                        "header 0x{id:02x} needs {total} bytes, have {}",
                        buf.len()
                    )));
                }
                let payload = &buf[3..total];
                let value = if kind == HeaderKind::Unicode {
                    let body = payload
                        .get(..payload.len())
                        .ok_or_else(|| ObexError::Decode("short unicode payload".into()))?;
                    HeaderValue::Unicode(decode_utf16be(body)?)
                } else {
                    HeaderValue::Bytes(payload.to_vec())
                };
                Ok((Header { id, name: name_of_id(id), value }, total))
            },
            HeaderKind::U8 => {
                if buf.len() < 2 {
                    return Err(ObexError::Incomplete("need 2 bytes for U8 header".into()));
                }
                Ok((
                    Header { id, name: name_of_id(id), value: HeaderValue::U8(buf[1]) },
                    2,
                ))
            },
            HeaderKind::U32 => {
                if buf.len() < 5 {
                    return Err(ObexError::Incomplete("need 5 bytes for U32 header".into()));
                }
                let v = read_u32_be(&buf[1..5])?;
                Ok((
                    Header { id, name: name_of_id(id), value: HeaderValue::U32(v) },
                    5,
                ))
            },
        }
    }
}

/// Decodes every header in `buf`, requiring the buffer to be consumed
/// exactly.
pub fn decode_all(buf: &[u8]) -> Result<Vec<Header>> {
    let mut headers = Vec::new();
    let mut offset = 0;
    while offset < buf.len() {
        let (header, consumed) = Header::decode_one(&buf[offset..])?;
        offset += consumed;
        headers.push(header);
    }
    if offset != buf.len() {
        return Err(ObexError::Decode("trailing bytes after last header".into()));
    }
    Ok(headers)
}

/// Encodes a slice of headers back-to-back in order.
pub fn encode_all(headers: &[Header]) -> Vec<u8> {
    let mut out = Vec::new();
    for h in headers {
        out.extend_from_slice(&h.encode());
    }
    out
}

/// Finds the first header with a matching mnemonic (case-insensitive).
pub fn find<'a>(headers: &'a [Header], name: &str) -> Option<&'a Header> {
    headers.iter().find(|h| h.is_named(name))
}

/// Finds every header with a matching mnemonic (case-insensitive), in
/// encounter order.
pub fn find_all<'a>(headers: &'a [Header], name: &str) -> Vec<&'a Header> {
    headers.iter().filter(|h| h.is_named(name)).collect()
}
