//! Low-level codecs shared by the deck formats.
//!
//! - `varint`: base-128 variable-length unsigned integers
//! - `base32`: RFC 4648 Base32 text transport for deck codes
//! - `base64`: RFC 4648 Base64 text transport for deckstrings

pub mod base32;
pub mod base64;
pub mod varint;

pub use base32::Base32Error;
pub use base64::Base64Error;
pub use varint::{VarintError, VarintReader};
