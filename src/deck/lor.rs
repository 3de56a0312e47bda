//! Grouped deck codes.
//!
//! ## Wire Layout
//!
//! ```text
//! header       1 byte, (format << 4) | version
//! of-3 groups  varint group count, then per group:
//!              varint size, varint set, varint faction, size x varint number
//! of-2 groups  same shape
//! of-1 groups  same shape
//! n-plus tail  until end of input, per card:
//!              varint count, varint set, varint faction, varint number
//! ```
//!
//! Cards held at one, two or three copies are grouped by (set, faction) so
//! those two fields are written once per group instead of once per card.
//! Groups are ordered by size, then by their lowest card code, and cards
//! within a group by code, so the same deck always produces the same code
//! whatever order it was supplied in.
//!
//! The byte buffer is rendered through unpadded Base32. Saved deck files may
//! put a `### name` line and `#` comments above the code; see
//! [`LorDeckFile`].
//!
//! ## Example
//!
//! ```
//! use deck_codes::{decode_deck, encode_deck, CardCodeAndCount};
//!
//! let deck = vec![
//!     CardCodeAndCount::new("01DE001", 3),
//!     CardCodeAndCount::new("02FR010", 5),
//! ];
//!
//! let code = encode_deck(&deck).unwrap();
//! let mut decoded = decode_deck(&code).unwrap();
//! decoded.sort();
//! assert_eq!(decoded, deck);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::DeckCodeConfig;
use super::error::DeckCodeError;
use super::file::{self, DeckFile};
use crate::cards::{CardCode, CardCodeAndCount, FactionTable};
use crate::codec::{base32, varint, VarintReader};

/// Copy counts that are grouped, in wire order.
const GROUPED_COUNTS: [u32; 3] = [3, 2, 1];

/// A validated deck entry.
struct ParsedEntry<'a> {
    code: &'a str,
    card: CardCode,
    count: u32,
}

/// Cards sharing a copy count, set and faction.
struct Group<'a> {
    set: u32,
    faction_id: u32,
    cards: SmallVec<[(&'a str, u32); 8]>,
}

/// Deck code encoder/decoder bound to a configuration and faction table.
///
/// The codec holds no mutable state and can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct LorCodec {
    config: DeckCodeConfig,
    factions: FactionTable,
}

impl LorCodec {
    /// Create a codec.
    #[must_use]
    pub fn new(config: DeckCodeConfig, factions: FactionTable) -> Self {
        Self { config, factions }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: DeckCodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the faction table.
    #[must_use]
    pub fn with_factions(mut self, factions: FactionTable) -> Self {
        self.factions = factions;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &DeckCodeConfig {
        &self.config
    }

    /// The active faction table.
    #[must_use]
    pub fn factions(&self) -> &FactionTable {
        &self.factions
    }

    /// Encode a deck into a Base32 deck code.
    pub fn encode(&self, deck: &[CardCodeAndCount]) -> Result<String, DeckCodeError> {
        let bytes = self.encode_bytes(deck)?;
        Ok(base32::encode(&bytes, self.config.pad_output))
    }

    /// Encode a deck into the raw byte layout (before Base32).
    ///
    /// Fails with `UnsupportedVersion` when the configured version is one
    /// this codec would refuse to decode.
    pub fn encode_bytes(&self, deck: &[CardCodeAndCount]) -> Result<Vec<u8>, DeckCodeError> {
        let version = self.config.version;
        if version > self.config.max_known_version {
            log::warn!(
                "refusing to write version {} above supported version {}",
                version,
                self.config.max_known_version
            );
            return Err(DeckCodeError::UnsupportedVersion {
                version,
                max: self.config.max_known_version,
            });
        }

        let entries = self.parse_entries(deck).map_err(|err| {
            log::debug!("rejected deck: {}", err);
            err
        })?;

        let mut grouped: [Vec<&ParsedEntry<'_>>; 3] = Default::default();
        let mut n_plus: Vec<&ParsedEntry<'_>> = Vec::new();
        for entry in &entries {
            match entry.count {
                3 => grouped[0].push(entry),
                2 => grouped[1].push(entry),
                1 => grouped[2].push(entry),
                _ => n_plus.push(entry),
            }
        }

        let mut out = Vec::with_capacity(1 + entries.len() * 4);
        out.push(self.config.header_byte());

        for (bucket, count) in grouped.iter().zip(GROUPED_COUNTS) {
            let groups = group_by_set_and_faction(bucket);
            varint::encode_into(groups.len() as u64, &mut out);

            for group in &groups {
                log::trace!(
                    "of-{} group: set {} faction {} with {} cards",
                    count,
                    group.set,
                    group.faction_id,
                    group.cards.len()
                );
                varint::encode_into(group.cards.len() as u64, &mut out);
                varint::encode_into(u64::from(group.set), &mut out);
                varint::encode_into(u64::from(group.faction_id), &mut out);
                for &(_, number) in &group.cards {
                    varint::encode_into(u64::from(number), &mut out);
                }
            }
        }

        n_plus.sort_by(|a, b| a.code.cmp(b.code).then(a.count.cmp(&b.count)));
        for entry in &n_plus {
            varint::encode_into(u64::from(entry.count), &mut out);
            varint::encode_into(u64::from(entry.card.set), &mut out);
            varint::encode_into(u64::from(entry.card.faction_id), &mut out);
            varint::encode_into(u64::from(entry.card.number), &mut out);
        }

        log::debug!(
            "encoded {} deck entries ({} of-3, {} of-2, {} of-1, {} n-plus) into {} bytes",
            entries.len(),
            grouped[0].len(),
            grouped[1].len(),
            grouped[2].len(),
            n_plus.len(),
            out.len()
        );

        Ok(out)
    }

    /// Decode a Base32 deck code.
    ///
    /// Entries come back in wire order: all three-copy cards, then two, then
    /// one, then the n-plus tail.
    pub fn decode(&self, code: &str) -> Result<Vec<CardCodeAndCount>, DeckCodeError> {
        let bytes = base32::decode(code).map_err(|err| {
            log::debug!("rejected deck code: {}", err);
            DeckCodeError::from(err)
        })?;
        self.decode_bytes(&bytes)
    }

    /// Decode the raw byte layout.
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Vec<CardCodeAndCount>, DeckCodeError> {
        let mut reader = VarintReader::new(bytes);
        let header = reader.read_byte().ok_or(DeckCodeError::TruncatedInput)?;

        let version = header & 0x0F;
        if version > self.config.max_known_version {
            log::warn!(
                "deck code version {} exceeds supported version {}",
                version,
                self.config.max_known_version
            );
            return Err(DeckCodeError::UnsupportedVersion {
                version,
                max: self.config.max_known_version,
            });
        }

        let mut deck = Vec::new();

        for count in GROUPED_COUNTS {
            let group_count = reader.read()?;
            for _ in 0..group_count {
                let size = reader.read()?;
                let set = reader.read()?;
                let faction = self.faction_code(reader.read()?)?;

                for _ in 0..size {
                    let number = reader.read()?;
                    deck.push(CardCodeAndCount::new(CardCode::format(set, faction, number), count));
                }
            }
        }

        while !reader.is_empty() {
            let count = reader.read()?;
            let set = reader.read()?;
            let faction = self.faction_code(reader.read()?)?;
            let number = reader.read()?;

            let count = u32::try_from(count)
                .map_err(|_| DeckCodeError::MalformedVarint(varint::VarintError::Overflow))?;
            deck.push(CardCodeAndCount::new(CardCode::format(set, faction, number), count));
        }

        log::debug!("decoded {} deck entries from {} bytes", deck.len(), bytes.len());
        Ok(deck)
    }

    /// Read a saved deck file, or a bare deck code.
    ///
    /// The name comes from the first `###` line. Other `#` lines and blank
    /// lines are skipped and the first remaining line is decoded.
    pub fn decode_file(&self, text: &str) -> Result<LorDeckFile, DeckCodeError> {
        let parsed = DeckFile::parse(text);
        let code = parsed.code.ok_or(DeckCodeError::MissingDeckCode)?;
        Ok(LorDeckFile {
            name: parsed.name.map(str::to_owned),
            cards: self.decode(code)?,
        })
    }

    /// Write a deck file: an optional `### name` line, then the code.
    pub fn export(&self, deck: &LorDeckFile) -> Result<String, DeckCodeError> {
        let code = self.encode(&deck.cards)?;
        let mut out = String::new();
        file::write_header(&mut out, deck.name.as_deref(), &[]);
        out.push_str(&code);
        out.push('\n');
        Ok(out)
    }

    /// Check every entry without encoding.
    pub fn validate(&self, deck: &[CardCodeAndCount]) -> Result<(), DeckCodeError> {
        self.parse_entries(deck).map(|_| ())
    }

    /// True if every entry has a well-formed card code and at least one copy.
    #[must_use]
    pub fn is_valid(&self, deck: &[CardCodeAndCount]) -> bool {
        self.validate(deck).is_ok()
    }

    fn parse_entries<'a>(
        &self,
        deck: &'a [CardCodeAndCount],
    ) -> Result<Vec<ParsedEntry<'a>>, DeckCodeError> {
        deck.iter()
            .map(|entry| {
                let card = CardCode::parse(&entry.card_code, &self.factions).map_err(|source| {
                    DeckCodeError::InvalidCardCode {
                        code: entry.card_code.clone(),
                        source,
                    }
                })?;
                if entry.count < 1 {
                    return Err(DeckCodeError::InvalidCount {
                        code: entry.card_code.clone(),
                        count: entry.count,
                    });
                }
                Ok(ParsedEntry {
                    code: &entry.card_code,
                    card,
                    count: entry.count,
                })
            })
            .collect()
    }

    fn faction_code(&self, id: u64) -> Result<&str, DeckCodeError> {
        u32::try_from(id)
            .ok()
            .and_then(|id| self.factions.code_of(id))
            .ok_or(DeckCodeError::UnknownFaction(id))
    }
}

/// A deck with the name from its saved file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LorDeckFile {
    pub name: Option<String>,
    pub cards: Vec<CardCodeAndCount>,
}

impl LorDeckFile {
    /// A named deck.
    #[must_use]
    pub fn new(name: impl Into<String>, cards: Vec<CardCodeAndCount>) -> Self {
        Self {
            name: Some(name.into()),
            cards,
        }
    }
}

/// Group one bucket by (set, faction) and put the groups in canonical order.
fn group_by_set_and_faction<'a>(bucket: &[&ParsedEntry<'a>]) -> Vec<Group<'a>> {
    let mut by_key: FxHashMap<(u32, u32), Group<'a>> = FxHashMap::default();
    for entry in bucket {
        by_key
            .entry((entry.card.set, entry.card.faction_id))
            .or_insert_with(|| Group {
                set: entry.card.set,
                faction_id: entry.card.faction_id,
                cards: SmallVec::new(),
            })
            .cards
            .push((entry.code, entry.card.number));
    }

    let mut groups: Vec<Group<'a>> = by_key.into_values().collect();
    for group in &mut groups {
        group.cards.sort_unstable();
    }
    groups.sort_by(|a, b| {
        a.cards
            .len()
            .cmp(&b.cards.len())
            .then_with(|| a.cards[0].0.cmp(b.cards[0].0))
    });
    groups
}

/// Encode with the standard faction table and default configuration.
pub fn encode_deck(deck: &[CardCodeAndCount]) -> Result<String, DeckCodeError> {
    LorCodec::default().encode(deck)
}

/// Decode with the standard faction table and default configuration.
pub fn decode_deck(code: &str) -> Result<Vec<CardCodeAndCount>, DeckCodeError> {
    LorCodec::default().decode(code)
}

/// Read a saved deck file with the standard faction table.
pub fn decode_deck_file(text: &str) -> Result<LorDeckFile, DeckCodeError> {
    LorCodec::default().decode_file(text)
}

/// Structural check of a deck against the standard faction table.
#[must_use]
pub fn valid_card_codes_and_counts(deck: &[CardCodeAndCount]) -> bool {
    LorCodec::default().is_valid(deck)
}
