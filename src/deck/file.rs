//! Exported deck files.
//!
//! Both deck formats can be saved as plain text: an optional `###` name
//! line, any number of `#` comment lines, and the code itself on a line of
//! its own.
//!
//! ```text
//! ### Token Druid
//! # Class: Druid
//! # Format: Wild
//! #
//! AAEBAQcCAQMCAgUBBAM=
//! ```
//!
//! ```
//! use deck_codes::deck::DeckFile;
//!
//! let file = DeckFile::parse("### Aggro\n# Format: Wild\n#\nCEAQEAIAAEBAAAA\n");
//! assert_eq!(file.name, Some("Aggro"));
//! assert_eq!(file.field("Format"), Some("Wild"));
//! assert_eq!(file.code, Some("CEAQEAIAAEBAAAA"));
//! ```

use std::fmt::Write;

/// Prefix of the line holding the deck name.
pub const NAME_PREFIX: &str = "###";

/// Prefix of every comment line, the name line included.
pub const COMMENT_PREFIX: char = '#';

/// The parts of a deck file, borrowed from its text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckFile<'a> {
    /// Text after the first `###`, trimmed. `None` when absent or blank.
    pub name: Option<&'a str>,

    /// Other comment lines with the leading `#` and spaces removed.
    pub comments: Vec<&'a str>,

    /// First line that is neither blank nor a comment.
    pub code: Option<&'a str>,
}

impl<'a> DeckFile<'a> {
    /// Split deck file text into name, comments and code.
    ///
    /// A bare code with no comment lines parses as a file with only `code`
    /// set. Lines after the code are ignored.
    #[must_use]
    pub fn parse(text: &'a str) -> Self {
        let mut file = Self::default();

        for line in text.lines().map(str::trim) {
            if let Some(name) = line.strip_prefix(NAME_PREFIX) {
                let name = name.trim();
                if file.name.is_none() && !name.is_empty() {
                    file.name = Some(name);
                }
            } else if let Some(comment) = line.strip_prefix(COMMENT_PREFIX) {
                let comment = comment.trim();
                if !comment.is_empty() {
                    file.comments.push(comment);
                }
            } else if !line.is_empty() && file.code.is_none() {
                file.code = Some(line);
            }
        }

        file
    }

    /// Value of a `# Key: value` comment line.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&'a str> {
        self.comments.iter().copied().find_map(|comment| {
            let (k, v) = comment.split_once(':')?;
            (k.trim() == key).then(|| v.trim())
        })
    }
}

/// Append a `### name` line, one `# Key: value` line per field, then a
/// closing `#` line when any field was written.
pub(crate) fn write_header(out: &mut String, name: Option<&str>, fields: &[(&str, &str)]) {
    if let Some(name) = name {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{} {}", NAME_PREFIX, name.trim());
    }
    for (key, value) in fields {
        let _ = writeln!(out, "{} {}: {}", COMMENT_PREFIX, key, value);
    }
    if !fields.is_empty() {
        out.push(COMMENT_PREFIX);
        out.push('\n');
    }
}
