//! Hearthstone-style deckstrings.
//!
//! ## Wire Layout
//!
//! ```text
//! reserved   1 byte, always 0
//! version    varint, 1
//! format     varint (1 = wild, 2 = standard, ...)
//! heroes     varint count, then count x varint hero id
//! singles    varint count, then count x varint card id
//! doubles    varint count, then count x varint card id
//! n-copies   varint count, then count x (varint card id, varint copies)
//! ```
//!
//! The bytes travel as padded Base64. Exported deck files carry a `###`
//! name line and `#` comment lines around the deckstring; [`decode`] skips
//! them and [`HsdDeckFile`] keeps the name.
//!
//! ```
//! use deck_codes::deck::hsd::{self, HsdCard, HsdDeck, HsdDeckFile};
//!
//! let deck = HsdDeck::wild(vec![9, 3], vec![HsdCard::new(4, 3), HsdCard::new(1, 1)]);
//! let text = hsd::encode(&deck).unwrap();
//! assert_eq!(hsd::decode(&text).unwrap(), deck);
//!
//! let file = HsdDeckFile::new("Token Druid", deck.clone());
//! let exported = file.export().unwrap();
//! assert!(exported.starts_with("### Token Druid\n# Format: Wild\n#\n"));
//! assert_eq!(HsdDeckFile::parse(&exported).unwrap(), file);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::file::{self, DeckFile};
use crate::codec::{base64, varint, Base64Error, VarintError, VarintReader};

/// The only deckstring version written and read.
pub const DECKSTRING_VERSION: u64 = 1;

/// Format id for wild decks.
pub const FORMAT_WILD: u64 = 1;

/// Display names of the known format ids.
const FORMAT_NAMES: [(u64, &str); 4] = [(1, "Wild"), (2, "Standard"), (3, "Classic"), (4, "Twist")];

/// Display name written on the `# Format:` line, if the id is known.
#[must_use]
pub fn format_name(format: u64) -> Option<&'static str> {
    FORMAT_NAMES.iter().find(|(id, _)| *id == format).map(|(_, name)| *name)
}

/// Failure encoding or decoding a deckstring.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HsdError {
    #[error("invalid deckstring: {0}")]
    InvalidBase64(#[from] Base64Error),
    #[error("no deckstring found in input")]
    Missing,
    #[error("reserved byte must be 0, got {0}")]
    ReservedByte(u8),
    #[error("unsupported deckstring version {0}")]
    UnsupportedVersion(u64),
    #[error("deckstring ended in the middle of a record")]
    Truncated,
    #[error("value in deckstring does not fit")]
    Overflow,
    #[error("{0} unexpected bytes after the deck")]
    TrailingBytes(usize),
    #[error("card {0} has zero copies")]
    ZeroCount(u32),
}

impl From<VarintError> for HsdError {
    fn from(err: VarintError) -> Self {
        match err {
            VarintError::Truncated => Self::Truncated,
            VarintError::Overflow => Self::Overflow,
        }
    }
}

/// A card id and its copy count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HsdCard {
    pub id: u32,
    pub count: u32,
}

impl HsdCard {
    #[must_use]
    pub const fn new(id: u32, count: u32) -> Self {
        Self { id, count }
    }
}

/// Contents of a deckstring.
///
/// Decoded decks list heroes and cards sorted by id, so only decks in that
/// order compare equal after a round trip. [`HsdDeck::wild`] sorts both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsdDeck {
    pub format: u64,
    pub heroes: Vec<u32>,
    pub cards: Vec<HsdCard>,
}

impl HsdDeck {
    /// A wild-format deck. Heroes and cards are sorted by id.
    #[must_use]
    pub fn wild(mut heroes: Vec<u32>, mut cards: Vec<HsdCard>) -> Self {
        heroes.sort_unstable();
        cards.sort_unstable();
        Self {
            format: FORMAT_WILD,
            heroes,
            cards,
        }
    }
}

/// Encode a deck as a Base64 deckstring.
///
/// Each section is sorted by id so equal decks produce equal strings.
pub fn encode(deck: &HsdDeck) -> Result<String, HsdError> {
    Ok(base64::encode(&encode_bytes(deck)?))
}

/// Encode a deck into the raw byte layout.
pub fn encode_bytes(deck: &HsdDeck) -> Result<Vec<u8>, HsdError> {
    if let Some(card) = deck.cards.iter().find(|c| c.count == 0) {
        return Err(HsdError::ZeroCount(card.id));
    }

    let mut heroes = deck.heroes.clone();
    heroes.sort_unstable();
    let mut singles: Vec<u32> = deck.cards.iter().filter(|c| c.count == 1).map(|c| c.id).collect();
    let mut doubles: Vec<u32> = deck.cards.iter().filter(|c| c.count == 2).map(|c| c.id).collect();
    let mut many: Vec<HsdCard> = deck.cards.iter().filter(|c| c.count > 2).copied().collect();
    singles.sort_unstable();
    doubles.sort_unstable();
    many.sort_unstable();

    let mut out = vec![0];
    varint::encode_into(DECKSTRING_VERSION, &mut out);
    varint::encode_into(deck.format, &mut out);

    for ids in [&heroes, &singles, &doubles] {
        varint::encode_into(ids.len() as u64, &mut out);
        for &id in ids {
            varint::encode_into(u64::from(id), &mut out);
        }
    }

    varint::encode_into(many.len() as u64, &mut out);
    for card in &many {
        varint::encode_into(u64::from(card.id), &mut out);
        varint::encode_into(u64::from(card.count), &mut out);
    }

    Ok(out)
}

/// Decode a deckstring, or an exported deck file containing one.
///
/// Blank lines and lines starting with `#` are skipped; the first remaining
/// line is the deckstring.
pub fn decode(text: &str) -> Result<HsdDeck, HsdError> {
    HsdDeckFile::parse(text).map(|file| file.deck)
}

/// Decode the raw byte layout.
pub fn decode_bytes(bytes: &[u8]) -> Result<HsdDeck, HsdError> {
    let mut reader = VarintReader::new(bytes);

    let reserved = reader.read_byte().ok_or(HsdError::Truncated)?;
    if reserved != 0 {
        return Err(HsdError::ReservedByte(reserved));
    }
    let version = reader.read()?;
    if version != DECKSTRING_VERSION {
        return Err(HsdError::UnsupportedVersion(version));
    }
    let format = reader.read()?;

    let mut heroes = read_ids(&mut reader)?;
    let mut cards: Vec<HsdCard> = Vec::new();
    for count in [1, 2] {
        cards.extend(read_ids(&mut reader)?.into_iter().map(|id| HsdCard::new(id, count)));
    }

    let many = reader.read()?;
    for _ in 0..many {
        let id = read_u32(&mut reader)?;
        let count = read_u32(&mut reader)?;
        cards.push(HsdCard::new(id, count));
    }

    if !reader.is_empty() {
        return Err(HsdError::TrailingBytes(reader.remaining()));
    }

    heroes.sort_unstable();
    cards.sort_unstable();
    log::debug!("decoded deckstring with {} heroes and {} cards", heroes.len(), cards.len());

    Ok(HsdDeck { format, heroes, cards })
}

/// A deckstring with the name and class of its exported file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsdDeckFile {
    pub name: Option<String>,
    pub class: Option<String>,
    pub deck: HsdDeck,
}

impl HsdDeckFile {
    /// A named deck without a class line.
    #[must_use]
    pub fn new(name: impl Into<String>, deck: HsdDeck) -> Self {
        Self {
            name: Some(name.into()),
            class: None,
            deck,
        }
    }

    /// Set the `# Class:` line.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Read an exported deck file, or a bare deckstring.
    ///
    /// The name comes from the first `###` line and the class from a
    /// `# Class:` line. Other comments are skipped.
    pub fn parse(text: &str) -> Result<Self, HsdError> {
        let parsed = DeckFile::parse(text);
        let line = parsed.code.ok_or(HsdError::Missing)?;
        let deck = decode_bytes(&base64::decode(line)?)?;
        Ok(Self {
            name: parsed.name.map(str::to_owned),
            class: parsed.field("Class").map(str::to_owned),
            deck,
        })
    }

    /// Write the deck file: `### name`, `# Class:`, `# Format:` and a
    /// closing `#`, then the deckstring.
    ///
    /// Unknown format ids are written as numbers.
    pub fn export(&self) -> Result<String, HsdError> {
        let deckstring = encode(&self.deck)?;

        let format = format_name(self.deck.format)
            .map_or_else(|| self.deck.format.to_string(), str::to_owned);
        let mut fields: Vec<(&str, &str)> = Vec::with_capacity(2);
        if let Some(class) = &self.class {
            fields.push(("Class", class.as_str()));
        }
        fields.push(("Format", format.as_str()));

        let mut out = String::new();
        file::write_header(&mut out, self.name.as_deref(), &fields);
        out.push_str(&deckstring);
        out.push('\n');
        Ok(out)
    }
}

fn read_ids(reader: &mut VarintReader<'_>) -> Result<Vec<u32>, HsdError> {
    let len = reader.read()?;
    (0..len).map(|_| read_u32(reader)).collect()
}

fn read_u32(reader: &mut VarintReader<'_>) -> Result<u32, HsdError> {
    u32::try_from(reader.read()?).map_err(|_| HsdError::Overflow)
}
