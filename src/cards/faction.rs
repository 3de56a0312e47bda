//! Faction table: two-letter faction codes and their wire identifiers.
//!
//! The table is a bijection. Every code maps to exactly one id and every
//! id maps back to exactly one code. The standard table is a compile-time
//! constant and never changes at runtime; games with additional factions
//! build their own with [`FactionTable::new`].
//!
//! ```
//! use deck_codes::cards::FactionTable;
//!
//! let table = FactionTable::standard();
//! assert_eq!(table.id_of("IO"), Some(2));
//! assert_eq!(table.code_of(6), Some("BW"));
//! assert_eq!(table.id_of("XX"), None);
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of a faction table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Faction {
    /// Two uppercase ASCII letters, e.g. `"DE"`.
    pub code: Cow<'static, str>,
    /// Identifier written into deck codes.
    pub id: u32,
}

impl Faction {
    /// Const constructor for static tables.
    #[must_use]
    pub const fn new(code: &'static str, id: u32) -> Self {
        Self { code: Cow::Borrowed(code), id }
    }
}

const STANDARD_FACTIONS: &[Faction] = &[
    Faction::new("DE", 0),
    Faction::new("FR", 1),
    Faction::new("IO", 2),
    Faction::new("NX", 3),
    Faction::new("PZ", 4),
    Faction::new("SI", 5),
    Faction::new("BW", 6),
];

static STANDARD: FactionTable = FactionTable {
    entries: Cow::Borrowed(STANDARD_FACTIONS),
};

/// Rejected custom faction table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FactionTableError {
    #[error("faction code {0:?} must be two uppercase ASCII letters")]
    InvalidCode(String),
    #[error("faction code {0:?} appears more than once")]
    DuplicateCode(String),
    #[error("faction id {0} appears more than once")]
    DuplicateId(u32),
}

/// Bidirectional faction code / id lookup.
///
/// Tables hold a handful of entries, so lookups scan linearly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Faction>", into = "Vec<Faction>")]
pub struct FactionTable {
    entries: Cow<'static, [Faction]>,
}

impl FactionTable {
    /// The built-in seven-faction table.
    #[must_use]
    pub fn standard() -> &'static FactionTable {
        &STANDARD
    }

    /// Build a custom table, checking that it is a bijection.
    pub fn new(entries: Vec<Faction>) -> Result<Self, FactionTableError> {
        for (i, faction) in entries.iter().enumerate() {
            let code = faction.code.as_ref();
            if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
                return Err(FactionTableError::InvalidCode(code.to_owned()));
            }
            let earlier = &entries[..i];
            if earlier.iter().any(|f| f.code == faction.code) {
                return Err(FactionTableError::DuplicateCode(code.to_owned()));
            }
            if earlier.iter().any(|f| f.id == faction.id) {
                return Err(FactionTableError::DuplicateId(faction.id));
            }
        }

        Ok(Self { entries: Cow::Owned(entries) })
    }

    /// The standard table plus `extra` entries.
    pub fn extended(extra: impl IntoIterator<Item = Faction>) -> Result<Self, FactionTableError> {
        let mut entries = STANDARD_FACTIONS.to_vec();
        entries.extend(extra);
        Self::new(entries)
    }

    /// Identifier for a faction code.
    #[must_use]
    pub fn id_of(&self, code: &str) -> Option<u32> {
        self.entries.iter().find(|f| f.code == code).map(|f| f.id)
    }

    /// Faction code for an identifier.
    #[must_use]
    pub fn code_of(&self, id: u32) -> Option<&str> {
        self.entries.iter().find(|f| f.id == id).map(|f| f.code.as_ref())
    }

    /// Number of factions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no factions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Faction> {
        self.entries.iter()
    }
}

impl TryFrom<Vec<Faction>> for FactionTable {
    type Error = FactionTableError;

    fn try_from(entries: Vec<Faction>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<FactionTable> for Vec<Faction> {
    fn from(table: FactionTable) -> Self {
        table.entries.into_owned()
    }
}

impl Default for FactionTable {
    fn default() -> Self {
        STANDARD.clone()
    }
}
