//! Deck formats built on the low-level codecs.
//!
//! ## Key Types
//!
//! - `LorCodec`: Grouped, versioned Base32 deck codes
//! - `DeckCodeConfig`: Header nibbles, accepted versions, padding
//! - `DeckCodeError`: Every way encoding or decoding a deck code can fail
//!
//! `file` reads and writes the `###` name and `#` comment framing shared by
//! exported deck files of both formats.
//!
//! `hsd` holds the Hearthstone-style deckstring format, which shares the
//! varint primitive but travels as Base64.

pub mod config;
pub mod error;
pub mod file;
pub mod hsd;
pub mod lor;

pub use config::DeckCodeConfig;
pub use error::DeckCodeError;
pub use file::DeckFile;
pub use hsd::{HsdCard, HsdDeck, HsdDeckFile, HsdError};
pub use lor::{
    decode_deck, decode_deck_file, encode_deck, valid_card_codes_and_counts, LorCodec, LorDeckFile,
};
