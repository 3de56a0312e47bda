//! Card codes and counted deck entries.
//!
//! A card code is seven ASCII characters: a two-digit set number, a
//! two-letter faction code and a three-digit card number, e.g. `01DE042`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::faction::FactionTable;

/// Length of every card code.
pub const CARD_CODE_LEN: usize = 7;

/// Why a card code failed to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CardCodeError {
    #[error("card code must be 7 ASCII characters, got {0}")]
    WrongLength(usize),
    #[error("set number {0:?} is not two digits")]
    InvalidSet(String),
    #[error("unknown faction {0:?}")]
    UnknownFaction(String),
    #[error("card number {0:?} is not three digits")]
    InvalidNumber(String),
}

/// A parsed card code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardCode {
    /// Set number (`01` in `01DE042`).
    pub set: u32,
    /// Faction code (`DE`).
    pub faction: String,
    /// Faction wire identifier from the table used to parse.
    pub faction_id: u32,
    /// Card number within the set (`042`).
    pub number: u32,
}

impl CardCode {
    /// Parse and validate `code` against `factions`.
    ///
    /// ```
    /// use deck_codes::cards::{CardCode, FactionTable};
    ///
    /// let card = CardCode::parse("01DE042", FactionTable::standard()).unwrap();
    /// assert_eq!((card.set, card.faction_id, card.number), (1, 0, 42));
    /// assert_eq!(card.to_string(), "01DE042");
    /// ```
    pub fn parse(code: &str, factions: &FactionTable) -> Result<Self, CardCodeError> {
        if code.len() != CARD_CODE_LEN || !code.is_ascii() {
            return Err(CardCodeError::WrongLength(code.chars().count()));
        }

        let set = parse_digits(&code[0..2])
            .ok_or_else(|| CardCodeError::InvalidSet(code[0..2].to_owned()))?;
        let faction = &code[2..4];
        let faction_id = factions
            .id_of(faction)
            .ok_or_else(|| CardCodeError::UnknownFaction(faction.to_owned()))?;
        let number = parse_digits(&code[4..7])
            .ok_or_else(|| CardCodeError::InvalidNumber(code[4..7].to_owned()))?;

        Ok(Self {
            set,
            faction: faction.to_owned(),
            faction_id,
            number,
        })
    }

    /// Render a card code from its parts, zero-padding the numbers.
    #[must_use]
    pub fn format(set: u64, faction: &str, number: u64) -> String {
        format!("{set:02}{faction}{number:03}")
    }
}

impl fmt::Display for CardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{}{:03}", self.set, self.faction, self.number)
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

/// One deck entry: a card code and how many copies the deck holds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardCodeAndCount {
    pub card_code: String,
    pub count: u32,
}

impl CardCodeAndCount {
    /// Create a new entry.
    #[must_use]
    pub fn new(card_code: impl Into<String>, count: u32) -> Self {
        Self {
            card_code: card_code.into(),
            count,
        }
    }
}

impl fmt::Display for CardCodeAndCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.count, self.card_code)
    }
}

impl<S: Into<String>> From<(S, u32)> for CardCodeAndCount {
    fn from((card_code, count): (S, u32)) -> Self {
        Self::new(card_code, count)
    }
}
