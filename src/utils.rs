// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Small formatting helpers shared by the codec and the demo binary.

use core::fmt;

/// Renders a byte slice as lowercase hex pairs, capped at `max` bytes with a
/// trailing marker when truncated. Used in `tracing` fields so dumping a
/// large body never floods the log.
pub struct HexPreview<'a> {
    bytes: &'a [u8],
    max: usize,
}

impl<'a> HexPreview<'a> {
    pub fn new(bytes: &'a [u8], max: usize) -> Self {
        HexPreview { bytes, max }
    }
}

impl fmt::Display for HexPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = &self.bytes[..self.bytes.len().min(self.max)];
        for (i, b) in shown.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        if self.bytes.len() > self.max {
            f.write_str(" ...")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_slice_prints_in_full() {
        assert_eq!(HexPreview::new(&[0xDE, 0xAD], 8).to_string(), "de ad");
    }

    #[test]
    fn long_slice_is_truncated() {
        let data = [0u8; 5];
        assert_eq!(HexPreview::new(&data, 2).to_string(), "00 00 ...");
    }

    #[test]
    fn empty_slice_prints_empty() {
        assert_eq!(HexPreview::new(&[], 8).to_string(), "");
    }
}
