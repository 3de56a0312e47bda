//! Deck code tests.
//!
//! These tests exercise the public encode/decode surface:
//! - Concrete decks with known codes
//! - Order independence of encoding
//! - Rejection of malformed input
//! - Round-trips over generated decks

use std::collections::BTreeMap;

use deck_codes::codec::{base32, varint, Base32Error};
use deck_codes::{
    decode_deck, decode_deck_file, encode_deck, valid_card_codes_and_counts, CardCodeAndCount,
    DeckCodeConfig, DeckCodeError, FactionTable, LorCodec, LorDeckFile,
};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn entry(code: &str, count: u32) -> CardCodeAndCount {
    CardCodeAndCount::new(code, count)
}

fn sorted(mut deck: Vec<CardCodeAndCount>) -> Vec<CardCodeAndCount> {
    deck.sort();
    deck
}

/// A constructed-style deck touching every bucket.
fn mixed_deck() -> Vec<CardCodeAndCount> {
    vec![
        entry("01DE001", 3),
        entry("01DE012", 3),
        entry("01FR024", 3),
        entry("02IO007", 2),
        entry("02IO015", 2),
        entry("01NX020", 2),
        entry("03PZ040", 1),
        entry("01SI053", 1),
        entry("01SI002", 1),
        entry("04BW026", 1),
        entry("01DE045", 4),
        entry("02FR010", 6),
        entry("01IO130", 40),
    ]
}

/// Two three-copy cards from the same set and faction.
#[test]
fn test_two_triples_round_trip() {
    let deck = vec![entry("01DE001", 3), entry("01DE002", 3)];
    let code = encode_deck(&deck).unwrap();

    let decoded = decode_deck(&code).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(sorted(decoded), deck);
}

/// A single card at five copies goes through the n-plus tail.
#[test]
fn test_n_plus_round_trip() {
    let deck = vec![entry("02FR010", 5)];
    let code = encode_deck(&deck).unwrap();
    assert_eq!(decode_deck(&code).unwrap(), deck);
}

/// Codes use only the Base32 alphabet by default.
#[test]
fn test_code_alphabet() {
    let code = encode_deck(&mixed_deck()).unwrap();
    assert!(!code.is_empty());
    assert!(code.bytes().all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b)));
}

/// The mixed deck survives a round trip.
#[test]
fn test_mixed_deck_round_trip() {
    let deck = mixed_deck();
    let decoded = decode_deck(&encode_deck(&deck).unwrap()).unwrap();
    assert_eq!(sorted(decoded), sorted(deck));
}

/// Decoded entries are grouped by copy count: 3, 2, 1, then n-plus.
#[test]
fn test_decoded_bucket_order() {
    let decoded = decode_deck(&encode_deck(&mixed_deck()).unwrap()).unwrap();
    let counts: Vec<u32> = decoded.iter().map(|e| e.count).collect();
    assert_eq!(counts, vec![3, 3, 3, 2, 2, 2, 1, 1, 1, 1, 4, 40, 6]);
}

/// Shuffling the input never changes the code.
#[test]
fn test_encoding_is_order_independent() {
    let deck = mixed_deck();
    let expected = encode_deck(&deck).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..50 {
        let mut shuffled = deck.clone();
        shuffled.shuffle(&mut rng);
        assert_eq!(encode_deck(&shuffled).unwrap(), expected);
    }
}

/// Lowercase and hyphenated codes decode to the same deck.
#[test]
fn test_decode_tolerates_formatting() {
    let deck = mixed_deck();
    let code = encode_deck(&deck).unwrap();
    let messy: String = code
        .to_lowercase()
        .chars()
        .enumerate()
        .flat_map(|(i, c)| if i > 0 && i % 4 == 0 { vec!['-', c] } else { vec![c] })
        .collect();

    assert_eq!(decode_deck(&messy).unwrap(), decode_deck(&code).unwrap());
}

/// Unknown faction strings are rejected when encoding.
#[test]
fn test_encode_rejects_unknown_faction() {
    let err = encode_deck(&[entry("01DE001", 2), entry("01ZZ001", 2)]).unwrap_err();
    assert!(err.is_invalid_card_code());
    assert!(matches!(err, DeckCodeError::InvalidCardCode { ref code, .. } if code == "01ZZ001"));
}

/// Malformed codes and counts are rejected and nothing is returned.
#[test]
fn test_encode_rejects_malformed_entries() {
    for bad in [
        entry("1DE001", 1),
        entry("01DE0001", 1),
        entry("AADE001", 1),
        entry("01DEAAA", 1),
        entry("01DE001", 0),
    ] {
        let deck = vec![entry("01DE002", 3), bad.clone()];
        assert!(!valid_card_codes_and_counts(&deck), "{bad} should be invalid");
        assert!(encode_deck(&deck).unwrap_err().is_invalid_card_code());
    }
}

/// A hand-built stream naming faction 42 fails with UnknownFaction.
#[test]
fn test_decode_rejects_unknown_faction_id() {
    let mut bytes = vec![0x11, 0, 0, 1, 1, 1];
    varint::encode_into(42, &mut bytes);
    varint::encode_into(1, &mut bytes);
    let code = base32::encode(&bytes, false);

    assert_eq!(decode_deck(&code), Err(DeckCodeError::UnknownFaction(42)));
}

/// Versions above the maximum fail instead of being parsed.
#[test]
fn test_decode_rejects_newer_version() {
    let code = base32::encode(&[0x13, 0, 0, 0], false);
    assert_eq!(
        decode_deck(&code),
        Err(DeckCodeError::UnsupportedVersion { version: 3, max: 2 })
    );

    let code = base32::encode(&[0x1F, 1, 1, 1, 0, 1], false);
    assert!(matches!(decode_deck(&code), Err(DeckCodeError::UnsupportedVersion { .. })));
}

/// Version 2 headers decode with the same layout.
#[test]
fn test_decode_accepts_version_two() {
    let code = base32::encode(&[0x12, 1, 1, 1, 0, 1, 0, 0], false);
    assert_eq!(decode_deck(&code).unwrap(), vec![entry("01DE001", 3)]);
}

/// Characters outside the alphabet fail as InvalidDeckCode.
#[test]
fn test_decode_rejects_bad_characters() {
    assert!(matches!(decode_deck("CEAQ1AIA"), Err(DeckCodeError::InvalidDeckCode(_))));
    assert!(matches!(decode_deck("CEAQ!AIA"), Err(DeckCodeError::InvalidDeckCode(_))));
}

/// The error position points at the bad character in the text as given.
#[test]
fn test_bad_character_position_counts_separators() {
    assert_eq!(
        decode_deck("ceaq-eai1"),
        Err(DeckCodeError::InvalidDeckCode(Base32Error::IllegalCharacter {
            character: '1',
            position: 8,
        }))
    );
}

/// A saved file with a name line decodes to the same deck as its bare code.
#[test]
fn test_deck_file_round_trip() {
    let deck = mixed_deck();
    let code = encode_deck(&deck).unwrap();
    let text = format!("### Spider Aggro\n# Region: Shadow Isles\n#\n{code}\n");

    let file = decode_deck_file(&text).unwrap();
    assert_eq!(file.name.as_deref(), Some("Spider Aggro"));
    assert_eq!(file.cards, decode_deck(&code).unwrap());

    let codec = LorCodec::default();
    let exported = codec.export(&LorDeckFile::new("Spider Aggro", deck.clone())).unwrap();
    assert_eq!(exported, format!("### Spider Aggro\n{code}\n"));
    assert_eq!(sorted(codec.decode_file(&exported).unwrap().cards), sorted(deck));
}

/// A bare deck code still fails on a `#` line; files go through the file reader.
#[test]
fn test_plain_decode_rejects_file_framing() {
    let code = encode_deck(&mixed_deck()).unwrap();
    assert!(matches!(
        decode_deck(&format!("### Name\n{code}")),
        Err(DeckCodeError::InvalidDeckCode(_))
    ));
    assert_eq!(decode_deck_file("# nothing here\n"), Err(DeckCodeError::MissingDeckCode));
}

/// The encoder never writes a header its own decoder would refuse.
#[test]
fn test_encode_refuses_version_above_maximum() {
    let mut config = DeckCodeConfig::default();
    config.version = 3;
    let err = LorCodec::default().with_config(config).encode(&mixed_deck()).unwrap_err();
    assert_eq!(err, DeckCodeError::UnsupportedVersion { version: 3, max: 2 });

    let mut config = DeckCodeConfig::default().with_max_known_version(40);
    config.version = 20;
    let err = LorCodec::default().with_config(config).encode(&mixed_deck()).unwrap_err();
    assert_eq!(err, DeckCodeError::UnsupportedVersion { version: 20, max: 15 });
}

/// Cutting a code short is a failure, never a shorter deck.
#[test]
fn test_decode_rejects_truncated_code() {
    let bytes = LorCodec::default().encode_bytes(&mixed_deck()).unwrap();

    for len in 0..bytes.len() {
        let prefix = &bytes[..len];
        match LorCodec::default().decode_bytes(prefix) {
            Err(DeckCodeError::TruncatedInput) => {}
            // A prefix ending exactly on an n-plus record boundary is a valid, smaller deck.
            Ok(deck) => assert!(deck.len() < mixed_deck().len(), "prefix of {len} bytes"),
            Err(other) => panic!("unexpected error {other:?} for prefix of {len} bytes"),
        }
    }
}

/// An empty string has no header byte.
#[test]
fn test_decode_empty_string() {
    assert_eq!(decode_deck(""), Err(DeckCodeError::TruncatedInput));
}

/// Padding is a configuration choice and both forms decode.
#[test]
fn test_padding_config() {
    let deck = mixed_deck();
    let padded = LorCodec::default()
        .with_config(DeckCodeConfig::default().with_padding())
        .encode(&deck)
        .unwrap();
    let plain = encode_deck(&deck).unwrap();

    assert_eq!(padded.len() % 8, 0);
    assert_eq!(padded.trim_end_matches('='), plain);
    assert_eq!(decode_deck(&padded).unwrap(), decode_deck(&plain).unwrap());
}

/// The default codec uses the standard faction table.
#[test]
fn test_default_codec_uses_standard_table() {
    let codec = LorCodec::default();
    assert_eq!(codec.factions(), FactionTable::standard());
    assert_eq!(codec.config(), &DeckCodeConfig::default());
}

const FACTIONS: [&str; 7] = ["DE", "FR", "IO", "NX", "PZ", "SI", "BW"];

/// Decks with distinct card codes and positive counts.
fn arb_deck() -> impl Strategy<Value = Vec<CardCodeAndCount>> {
    prop::collection::btree_map((0u32..100, 0usize..FACTIONS.len(), 0u32..1000), 1u32..=12, 0..60)
        .prop_map(|cards: BTreeMap<(u32, usize, u32), u32>| {
            cards
                .into_iter()
                .map(|((set, faction, number), count)| {
                    CardCodeAndCount::new(format!("{set:02}{}{number:03}", FACTIONS[faction]), count)
                })
                .collect()
        })
}

proptest! {
    #[test]
    fn prop_round_trip(deck in arb_deck()) {
        let decoded = decode_deck(&encode_deck(&deck).unwrap()).unwrap();
        prop_assert_eq!(sorted(decoded), sorted(deck));
    }

    #[test]
    fn prop_order_independent(deck in arb_deck().prop_shuffle(), seed in any::<u64>()) {
        let mut shuffled = deck.clone();
        shuffled.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(encode_deck(&deck).unwrap(), encode_deck(&shuffled).unwrap());
    }

    #[test]
    fn prop_generated_decks_are_valid(deck in arb_deck()) {
        prop_assert!(valid_card_codes_and_counts(&deck));
    }
}
