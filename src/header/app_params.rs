// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Sub-codec for the `AppParameters` header payload: a sequence of
//! `(tag, length, value)` triples where `length` counts the whole triple.

use crate::error::{ObexError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppParameter {
    pub tag: u8,
    pub value: Vec<u8>,
}

/// Decodes every triple in an `AppParameters` byte payload.
pub fn decode(buf: &[u8]) -> Result<Vec<AppParameter>> {
    let mut out = Vec::new();
    let mut offset = 0;
    while offset < buf.len() {
        if buf.len() - offset < 2 {
            return Err(ObexError::Decode(
                "truncated app-parameter triple".into(),
            ));
        }
        let tag = buf[offset];
        let total = buf[offset + 1] as usize;
        if total < 2 {
            return Err(ObexError::Decode(format!(
                "app-parameter tag 0x{tag:02x} declares invalid length {total}"
            )));
        }
        if offset + total > buf.len() {
            return Err(ObexError::Decode(format!(
                "app-parameter tag 0x{tag:02x} length {total} exceeds remaining buffer"
            )));
        }
        let value = buf[offset + 2..offset + total].to_vec();
        out.push(AppParameter { tag, value });
        offset += total;
    }
    Ok(out)
}

/// Encodes a sequence of triples back into a single `AppParameters` payload.
pub fn encode(params: &[AppParameter]) -> Vec<u8> {
    let mut out = Vec::new();
    for p in params {
        let total = 2 + p.value.len();
        out.push(p.tag);
        out.push(total as u8);
        out.extend_from_slice(&p.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_single_triple() {
        let params = vec![AppParameter { tag: 0x01, value: vec![0x42] }];
        let encoded = encode(&params);
        assert_eq!(encoded, vec![0x01, 0x03, 0x42]);
        assert_eq!(decode(&encoded).unwrap(), params);
    }

    #[test]
    fn round_trips_multiple_triples() {
        let params = vec![
            AppParameter { tag: 0x01, value: vec![0xAA, 0xBB] },
            AppParameter { tag: 0x02, value: vec![] },
        ];
        let encoded = encode(&params);
        assert_eq!(decode(&encoded).unwrap(), params);
    }

    #[test]
    fn rejects_truncated_triple() {
        assert!(decode(&[0x01]).is_err());
    }

    #[test]
    fn rejects_length_overrun() {
        assert!(decode(&[0x01, 0x05, 0x00]).is_err());
    }
}
