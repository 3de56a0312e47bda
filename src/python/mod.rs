//! Python bindings for deck codes.
//!
//! # Quick Start
//!
//! ```python
//! import deck_codes as dc
//!
//! code = dc.encode_deck([("01DE001", 3), ("02FR010", 5)])
//! deck = dc.decode_deck(code)
//! print([entry.to_tuple() for entry in deck])
//! ```

use pyo3::prelude::*;

mod py_deck;

pub use py_deck::*;

/// deck_codes: compact, versioned deck codes for card games.
#[pymodule]
fn deck_codes(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCardCodeAndCount>()?;

    m.add_function(wrap_pyfunction!(py_deck::encode_deck, m)?)?;
    m.add_function(wrap_pyfunction!(py_deck::decode_deck, m)?)?;
    m.add_function(wrap_pyfunction!(py_deck::decode_deck_file, m)?)?;
    m.add_function(wrap_pyfunction!(py_deck::is_valid_deck, m)?)?;
    m.add_function(wrap_pyfunction!(py_deck::decode_deckstring, m)?)?;

    Ok(())
}
