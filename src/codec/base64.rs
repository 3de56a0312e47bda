//! Base64 text encoding (RFC 4648 standard alphabet, padded).
//!
//! Used by Hearthstone-style deckstrings.

use thiserror::Error;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: u8 = b'=';

/// Failure decoding Base64 text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Base64Error {
    #[error("illegal base64 character {character:?} at position {position}")]
    IllegalCharacter { character: char, position: usize },
    #[error("base64 input length {0} is not a multiple of 4")]
    InvalidLength(usize),
}

/// Encode bytes with `=` padding.
#[must_use]
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);

    for chunk in data.chunks(3) {
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied().unwrap_or(0);
        let b2 = chunk.get(2).copied().unwrap_or(0);
        let group = (u32::from(b0) << 16) | (u32::from(b1) << 8) | u32::from(b2);

        out.push(symbol(group >> 18));
        out.push(symbol(group >> 12));
        out.push(if chunk.len() > 1 { symbol(group >> 6) } else { PAD as char });
        out.push(if chunk.len() > 2 { symbol(group) } else { PAD as char });
    }

    out
}

/// Decode padded Base64, ignoring surrounding whitespace.
pub fn decode(encoded: &str) -> Result<Vec<u8>, Base64Error> {
    let input = encoded.trim().as_bytes();
    if input.len() % 4 != 0 {
        return Err(Base64Error::InvalidLength(input.len()));
    }

    let mut out = Vec::with_capacity(input.len() / 4 * 3);
    let quads = input.len() / 4;

    for (index, quad) in input.chunks(4).enumerate() {
        let last = index + 1 == quads;
        let padding = quad.iter().rev().take_while(|&&b| b == PAD).count();
        if padding > 2 || (padding > 0 && !last) {
            let offset = quad.iter().position(|&b| b == PAD).unwrap_or(0);
            return Err(illegal(PAD, index * 4 + offset));
        }

        let mut group: u32 = 0;
        for (offset, &byte) in quad[..4 - padding].iter().enumerate() {
            let value = value_of(byte).ok_or_else(|| illegal(byte, index * 4 + offset))?;
            group = (group << 6) | value;
        }
        group <<= 6 * padding as u32;

        out.push((group >> 16) as u8);
        if padding < 2 {
            out.push((group >> 8) as u8);
        }
        if padding < 1 {
            out.push(group as u8);
        }
    }

    Ok(out)
}

fn symbol(index: u32) -> char {
    char::from(ALPHABET[(index & 0x3F) as usize])
}

fn value_of(byte: u8) -> Option<u32> {
    ALPHABET.iter().position(|&b| b == byte).map(|i| i as u32)
}

fn illegal(byte: u8, position: usize) -> Base64Error {
    Base64Error::IllegalCharacter { character: char::from(byte), position }
}
