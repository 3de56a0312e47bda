//! Variable-length unsigned integers.
//!
//! Each byte carries seven payload bits, least-significant group first.
//! The high bit (`0x80`) marks that another byte follows.
//!
//! ```
//! use deck_codes::codec::varint;
//!
//! assert_eq!(varint::encode(300), vec![0xAC, 0x02]);
//! assert_eq!(varint::decode(&[0xAC, 0x02], 0), Ok((300, 2)));
//! ```

use thiserror::Error;

const PAYLOAD_MASK: u8 = 0x7F;
const CONTINUATION: u8 = 0x80;

/// Longest encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Failure reading a varint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum VarintError {
    /// The input ended before a byte without the continuation bit.
    #[error("input ended inside a varint")]
    Truncated,
    /// The encoded value does not fit in 64 bits.
    #[error("varint exceeds 64 bits")]
    Overflow,
}

/// Encode `value` into a fresh buffer.
#[must_use]
pub fn encode(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    encode_into(value, &mut out);
    out
}

/// Append the encoding of `value` to `out`.
///
/// Zero encodes as a single `0x00` byte.
pub fn encode_into(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let mut byte = (value as u8) & PAYLOAD_MASK;
        value >>= 7;
        if value != 0 {
            byte |= CONTINUATION;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Decode one varint from `bytes` starting at `cursor`.
///
/// Returns the value and the number of bytes consumed, including the
/// terminating byte.
pub fn decode(bytes: &[u8], cursor: usize) -> Result<(u64, usize), VarintError> {
    let mut value: u64 = 0;
    let tail = bytes.get(cursor..).unwrap_or(&[]);

    for (i, &byte) in tail.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(VarintError::Overflow);
        }
        let payload = u64::from(byte & PAYLOAD_MASK);
        // The tenth byte may only contribute the single remaining bit.
        if i == MAX_VARINT_LEN - 1 && payload > 1 {
            return Err(VarintError::Overflow);
        }
        value |= payload << (7 * i);

        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(VarintError::Truncated)
}

/// Sequential varint reader over a byte slice.
#[derive(Clone, Debug)]
pub struct VarintReader<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> VarintReader<'a> {
    /// Start reading at the beginning of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    /// Read the next varint and advance past it.
    pub fn read(&mut self) -> Result<u64, VarintError> {
        let (value, consumed) = decode(self.bytes, self.cursor)?;
        self.cursor += consumed;
        Ok(value)
    }

    /// Read a single raw byte.
    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.cursor)?;
        self.cursor += 1;
        Some(byte)
    }

    /// Current offset into the input.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }

    /// True once every byte has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_zero() {
        assert_eq!(encode(0), vec![0x00]);
    }

    #[test]
    fn test_encode_single_byte() {
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(127), vec![0x7F]);
    }

    #[test]
    fn test_encode_300() {
        assert_eq!(encode(300), vec![0xAC, 0x02]);
    }

    #[test]
    fn test_encode_boundaries() {
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(16_383), vec![0xFF, 0x7F]);
        assert_eq!(encode(16_384), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn test_encode_max() {
        let bytes = encode(u64::MAX);
        assert_eq!(bytes.len(), MAX_VARINT_LEN);
        assert_eq!(bytes[9], 0x01);
        assert_eq!(decode(&bytes, 0), Ok((u64::MAX, MAX_VARINT_LEN)));
    }

    #[test]
    fn test_encode_into_appends() {
        let mut out = vec![0x11];
        encode_into(300, &mut out);
        encode_into(0, &mut out);
        assert_eq!(out, vec![0x11, 0xAC, 0x02, 0x00]);
    }

    #[test]
    fn test_decode_at_cursor() {
        let bytes = [0xFF, 0xAC, 0x02, 0x05];
        assert_eq!(decode(&bytes, 1), Ok((300, 2)));
        assert_eq!(decode(&bytes, 3), Ok((5, 1)));
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(decode(&[], 0), Err(VarintError::Truncated));
        assert_eq!(decode(&[0x80], 0), Err(VarintError::Truncated));
        assert_eq!(decode(&[0xAC, 0x02], 2), Err(VarintError::Truncated));
        assert_eq!(decode(&[0x01], 7), Err(VarintError::Truncated));
    }

    #[test]
    fn test_decode_overflow() {
        let too_long = [0x80u8; 11];
        assert_eq!(decode(&too_long, 0), Err(VarintError::Overflow));

        let mut wide = vec![0xFF; 9];
        wide.push(0x02);
        assert_eq!(decode(&wide, 0), Err(VarintError::Overflow));
    }

    #[test]
    fn test_reader_sequence() {
        let mut bytes = Vec::new();
        for value in [3u64, 0, 300, 1 << 40] {
            encode_into(value, &mut bytes);
        }

        let mut reader = VarintReader::new(&bytes);
        assert_eq!(reader.read(), Ok(3));
        assert_eq!(reader.read(), Ok(0));
        assert_eq!(reader.read(), Ok(300));
        assert_eq!(reader.read(), Ok(1 << 40));
        assert!(reader.is_empty());
        assert_eq!(reader.read(), Err(VarintError::Truncated));
    }

    #[test]
    fn test_reader_raw_byte() {
        let mut reader = VarintReader::new(&[0x11, 0x02]);
        assert_eq!(reader.read_byte(), Some(0x11));
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read(), Ok(2));
        assert_eq!(reader.read_byte(), None);
    }
}
