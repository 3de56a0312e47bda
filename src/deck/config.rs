//! Deck code configuration.

use serde::{Deserialize, Serialize};

/// Largest version the low header nibble can carry.
pub const MAX_HEADER_VERSION: u8 = 0x0F;

/// Header and transport settings for [`LorCodec`](super::LorCodec).
///
/// ## Example
///
/// ```
/// use deck_codes::deck::DeckCodeConfig;
///
/// let config = DeckCodeConfig::default().with_padding();
/// assert_eq!(config.header_byte(), 0x11);
/// assert!(config.pad_output);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCodeConfig {
    /// Format nibble written in the high half of the header byte.
    pub format: u8,

    /// Version nibble written in the low half of the header byte.
    pub version: u8,

    /// Highest header version the decoder accepts, and the highest
    /// `version` the encoder will write.
    pub max_known_version: u8,

    /// Pad encoded output with `=` to a multiple of 8 characters.
    pub pad_output: bool,
}

impl Default for DeckCodeConfig {
    fn default() -> Self {
        Self {
            format: 1,
            version: 1,
            max_known_version: 2,
            pad_output: false,
        }
    }
}

impl DeckCodeConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the highest accepted version.
    ///
    /// A header holds versions up to 15, so larger values are clamped to 15
    /// and accept every header.
    #[must_use]
    pub fn with_max_known_version(mut self, version: u8) -> Self {
        self.max_known_version = version.min(MAX_HEADER_VERSION);
        self
    }

    /// Pad encoded output.
    #[must_use]
    pub fn with_padding(mut self) -> Self {
        self.pad_output = true;
        self
    }

    /// Header byte: `(format << 4) | version`.
    #[must_use]
    pub fn header_byte(&self) -> u8 {
        ((self.format & 0x0F) << 4) | (self.version & 0x0F)
    }
}
