//! # deck-codes
//!
//! Compact, versioned, copy/paste-safe deck codes for trading card games.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: The same deck produces the same code regardless of
//!    the order its entries were supplied in.
//!
//! 2. **Lossless**: Decoding returns exactly the multiset of cards that was
//!    encoded. Only the entry order changes.
//!
//! 3. **Strict**: Malformed card codes, unknown factions, newer versions and
//!    truncated input are errors, never silently clamped or dropped.
//!
//! ## Architecture
//!
//! - **Varint**: every integer field is a base-128 varint.
//!
//! - **Grouping**: one-, two- and three-copy cards are grouped by
//!   (set, faction) so shared fields are written once per group.
//!
//! - **Base32**: the byte buffer travels as unpadded RFC 4648 Base32.
//!
//! ## Modules
//!
//! - `codec`: Varint, Base32 and Base64 primitives
//! - `cards`: Faction table, card codes, deck entries
//! - `deck`: Deck code encoder/decoder, configuration, errors, deck files, deckstrings
//!
//! ## Example
//!
//! ```
//! use deck_codes::{decode_deck, encode_deck, CardCodeAndCount};
//!
//! let deck = vec![
//!     CardCodeAndCount::new("01DE001", 3),
//!     CardCodeAndCount::new("01DE002", 3),
//! ];
//!
//! let code = encode_deck(&deck).unwrap();
//! assert_eq!(code, "CEAQEAIAAEBAAAA");
//! assert_eq!(decode_deck(&code).unwrap(), deck);
//! ```

pub mod cards;
pub mod codec;
pub mod deck;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::cards::{
    CardCode, CardCodeAndCount, CardCodeError,
    Faction, FactionTable, FactionTableError,
};

pub use crate::codec::{Base32Error, Base64Error, VarintError, VarintReader};

pub use crate::deck::{
    decode_deck, decode_deck_file, encode_deck, valid_card_codes_and_counts,
    DeckCodeConfig, DeckCodeError, DeckFile, LorCodec, LorDeckFile,
    HsdCard, HsdDeck, HsdDeckFile, HsdError,
};
