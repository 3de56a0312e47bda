//! Card identity: faction table, card codes and counted deck entries.
//!
//! ## Key Types
//!
//! - `FactionTable`: Bijective faction code / wire id lookup
//! - `CardCode`: Parsed `SSFFNNN` card code
//! - `CardCodeAndCount`: A deck entry (code plus copy count)
//!
//! The codec only identifies and counts cards. Resolving a code to a full
//! card (name, cost, text) is left to the host's card database.

pub mod code;
pub mod faction;

pub use code::{CardCode, CardCodeAndCount, CardCodeError, CARD_CODE_LEN};
pub use faction::{Faction, FactionTable, FactionTableError};
