//! Deck code bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cards::CardCodeAndCount;
use crate::deck::{hsd, DeckCodeConfig, LorCodec};

/// Python wrapper for CardCodeAndCount.
#[pyclass(name = "CardCodeAndCount")]
#[derive(Clone, Debug)]
pub struct PyCardCodeAndCount(pub CardCodeAndCount);

#[pymethods]
impl PyCardCodeAndCount {
    #[new]
    fn new(card_code: String, count: u32) -> Self {
        Self(CardCodeAndCount::new(card_code, count))
    }

    #[getter]
    fn card_code(&self) -> String {
        self.0.card_code.clone()
    }

    #[getter]
    fn count(&self) -> u32 {
        self.0.count
    }

    /// Convert to a `(card_code, count)` tuple.
    fn to_tuple(&self) -> (String, u32) {
        (self.0.card_code.clone(), self.0.count)
    }

    fn __repr__(&self) -> String {
        format!("CardCodeAndCount({:?}, {})", self.0.card_code, self.0.count)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

fn codec(pad: bool) -> LorCodec {
    let config = if pad {
        DeckCodeConfig::default().with_padding()
    } else {
        DeckCodeConfig::default()
    };
    LorCodec::default().with_config(config)
}

fn to_entries(deck: Vec<(String, u32)>) -> Vec<CardCodeAndCount> {
    deck.into_iter().map(CardCodeAndCount::from).collect()
}

/// Encode a list of `(card_code, count)` tuples into a deck code.
///
/// Raises ValueError for malformed card codes or counts below one.
#[pyfunction]
#[pyo3(signature = (deck, pad = false))]
pub fn encode_deck(deck: Vec<(String, u32)>, pad: bool) -> PyResult<String> {
    codec(pad)
        .encode(&to_entries(deck))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Decode a deck code into CardCodeAndCount entries.
#[pyfunction]
pub fn decode_deck(code: &str) -> PyResult<Vec<PyCardCodeAndCount>> {
    codec(false)
        .decode(code)
        .map(|deck| deck.into_iter().map(PyCardCodeAndCount).collect())
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Check a list of `(card_code, count)` tuples without encoding.
#[pyfunction]
pub fn is_valid_deck(deck: Vec<(String, u32)>) -> bool {
    codec(false).is_valid(&to_entries(deck))
}

/// Decode a Hearthstone deckstring into `(format, heroes, [(id, count)])`.
#[pyfunction]
pub fn decode_deckstring(text: &str) -> PyResult<(u64, Vec<u32>, Vec<(u32, u32)>)> {
    let deck = hsd::decode(text).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let cards = deck.cards.iter().map(|c| (c.id, c.count)).collect();
    Ok((deck.format, deck.heroes, cards))
}

/// Read a saved deck file into `(name, entries)`.
#[pyfunction]
pub fn decode_deck_file(text: &str) -> PyResult<(Option<String>, Vec<PyCardCodeAndCount>)> {
    let file = codec(false)
        .decode_file(text)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok((file.name, file.cards.into_iter().map(PyCardCodeAndCount).collect()))
}
