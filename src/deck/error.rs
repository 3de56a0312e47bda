//! Deck code failures.

use thiserror::Error;

use crate::cards::CardCodeError;
use crate::codec::{Base32Error, VarintError};

/// Why a deck could not be encoded or a deck code could not be decoded.
///
/// Every variant is final for the call that produced it; no partial deck or
/// partial code is ever returned alongside an error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckCodeError {
    /// A card code in the deck is malformed.
    #[error("invalid card code {code:?}: {source}")]
    InvalidCardCode {
        code: String,
        #[source]
        source: CardCodeError,
    },

    /// A deck entry has fewer than one copy.
    #[error("invalid count of {count} for card {code}")]
    InvalidCount { code: String, count: u32 },

    /// The deck code is not valid Base32.
    #[error("invalid deck code: {0}")]
    InvalidDeckCode(#[from] Base32Error),

    /// The header names a newer format version than this build reads.
    #[error("deck code version {version} is newer than supported version {max}")]
    UnsupportedVersion { version: u8, max: u8 },

    /// A deck file has no line holding a deck code.
    #[error("no deck code found in input")]
    MissingDeckCode,

    /// A decoded faction id is missing from the faction table.
    #[error("unknown faction id {0}")]
    UnknownFaction(u64),

    /// The byte stream ended inside a header, group or entry.
    #[error("deck code ended in the middle of a record")]
    TruncatedInput,

    /// A varint was too long to represent.
    #[error("malformed varint: {0}")]
    MalformedVarint(VarintError),
}

impl DeckCodeError {
    /// True for both card-code and count rejections.
    #[must_use]
    pub fn is_invalid_card_code(&self) -> bool {
        matches!(self, Self::InvalidCardCode { .. } | Self::InvalidCount { .. })
    }
}

impl From<VarintError> for DeckCodeError {
    fn from(err: VarintError) -> Self {
        match err {
            VarintError::Truncated => Self::TruncatedInput,
            VarintError::Overflow => Self::MalformedVarint(err),
        }
    }
}
