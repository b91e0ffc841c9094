// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Endian-neutral primitives shared by the header and packet codecs.
//!
//! Every multi-byte integer on the wire is big-endian; rather than hand
//! rolling shift/mask pairs at each call site we lean on `zerocopy`'s
//! byte-order wrapper types the same way a BHS field would.

use zerocopy::{
    byteorder::{U16, U32},
    BigEndian,
};

use crate::error::{ObexError, Result};

pub type Be16 = U16<BigEndian>;
pub type Be32 = U32<BigEndian>;

/// Reads a big-endian `u16` at `buf[0..2]`.
pub fn read_u16_be(buf: &[u8]) -> Result<u16> {
    let arr: [u8; 2] = buf
        .get(0..2)
        .ok_or_else(|| ObexError::Incomplete("need 2 bytes for u16".into()))?
        .try_into()
        .map_err(|_| ObexError::Incomplete("need 2 bytes for u16".into()))?;
    Ok(Be16::from_bytes(arr).get())
}

/// Reads a big-endian `u32` at `buf[0..4]`.
pub fn read_u32_be(buf: &[u8]) -> Result<u32> {
    let arr: [u8; 4] = buf
        .get(0..4)
        .ok_or_else(|| ObexError::Incomplete("need 4 bytes for u32".into()))?
        .try_into()
        .map_err(|_| ObexError::Incomplete("need 4 bytes for u32".into()))?;
    Ok(Be32::from_bytes(arr).get())
}

pub fn write_u16_be(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&Be16::new(v).to_bytes());
}

pub fn write_u32_be(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&Be32::new(v).to_bytes());
}

/// Encodes a string as null-terminated UTF-16BE, the representation OBEX
/// uses for every Unicode-kind header value.
pub fn encode_utf16be_nul(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 2 + 2);
    for unit in s.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out.extend_from_slice(&[0, 0]);
    out
}

/// Decodes a null-terminated (or bare) UTF-16BE byte sequence. Accepts an
/// odd trailing byte as malformed input rather than silently truncating it.
pub fn decode_utf16be(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(ObexError::Decode(
            "UTF-16BE payload has an odd number of bytes".into(),
        ));
    }
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    if units.last() == Some(&0) {
        units.pop();
    }
    String::from_utf16(&units)
        .map_err(|e| ObexError::Decode(format!("invalid UTF-16BE string: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16be_round_trips_ascii() {
        let encoded = encode_utf16be_nul("abc");
        assert_eq!(encoded, vec![0, b'a', 0, b'b', 0, b'c', 0, 0]);
        assert_eq!(decode_utf16be(&encoded).unwrap(), "abc");
    }

    #[test]
    fn utf16be_round_trips_empty() {
        let encoded = encode_utf16be_nul("");
        assert_eq!(encoded, vec![0, 0]);
        assert_eq!(decode_utf16be(&encoded).unwrap(), "");
    }

    #[test]
    fn utf16be_rejects_odd_length() {
        assert!(decode_utf16be(&[0, 1, 2]).is_err());
    }

    #[test]
    fn be_integers_round_trip() {
        let mut buf = Vec::new();
        write_u16_be(&mut buf, 0x1234);
        write_u32_be(&mut buf, 0xDEAD_BEEF);
        assert_eq!(read_u16_be(&buf[0..2]).unwrap(), 0x1234);
        assert_eq!(read_u32_be(&buf[2..6]).unwrap(), 0xDEAD_BEEF);
    }
}
