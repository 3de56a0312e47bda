//! Base32 text encoding (RFC 4648 alphabet).
//!
//! Deck codes travel as Base32 so they survive copy/paste, chat and URLs.
//! Output uses only `A-Z` and `2-7`; padding is optional.
//!
//! ```
//! use deck_codes::codec::base32;
//!
//! assert_eq!(base32::encode(&[0x00, 0x01, 0x02, 0x03, 0x04], false), "AAAQEAYE");
//! assert_eq!(base32::decode("aaaq-eaye").unwrap(), vec![0, 1, 2, 3, 4]);
//! ```

use thiserror::Error;

/// The 32 output symbols, indexed by 5-bit value.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const BITS_PER_CHAR: u32 = 5;
const CHAR_MASK: u32 = 0x1F;
const PAD: char = '=';
const SEPARATOR: char = '-';

/// Failure decoding Base32 text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Base32Error {
    /// A character outside the alphabet. `position` counts characters of
    /// the caller's input, separators and whitespace included.
    #[error("illegal base32 character {character:?} at position {position}")]
    IllegalCharacter { character: char, position: usize },
}

/// Encode bytes, optionally padding with `=` to a multiple of 8 characters.
#[must_use]
pub fn encode(data: &[u8], pad: bool) -> String {
    let mut out = String::with_capacity((data.len() * 8).div_ceil(5) + 7);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in data {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            out.push(symbol((buffer >> bits) & CHAR_MASK));
        }
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        out.push(symbol((buffer << (BITS_PER_CHAR - bits)) & CHAR_MASK));
    }

    if pad {
        while out.len() % 8 != 0 {
            out.push(PAD);
        }
    }

    out
}

/// Decode Base32 text.
///
/// Separators (`-`) and whitespace are ignored, trailing `=` padding is
/// stripped and lowercase input is accepted. Leftover bits that do not fill
/// a whole byte are discarded.
pub fn decode(encoded: &str) -> Result<Vec<u8>, Base32Error> {
    let body = encoded.trim_end_matches(|c: char| c == PAD || is_ignored(c));

    let mut out = Vec::with_capacity(body.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for (position, c) in body.chars().enumerate() {
        if is_ignored(c) {
            continue;
        }
        let value = value_of(c.to_ascii_uppercase())
            .ok_or(Base32Error::IllegalCharacter { character: c, position })?;
        buffer = (buffer << BITS_PER_CHAR) | value;
        bits += BITS_PER_CHAR;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    Ok(out)
}

fn is_ignored(c: char) -> bool {
    c == SEPARATOR || c.is_whitespace()
}

fn symbol(index: u32) -> char {
    char::from(ALPHABET[index as usize])
}

fn value_of(c: char) -> Option<u32> {
    match c {
        'A'..='Z' => Some(c as u32 - 'A' as u32),
        '2'..='7' => Some(c as u32 - '2' as u32 + 26),
        _ => None,
    }
}
