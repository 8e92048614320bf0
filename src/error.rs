//! Error types for the bibtex-simplifier crate

use thiserror::Error;

/// Result type for simplification operations
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for bibtex-simplifier
#[derive(Error, Debug)]
pub enum Error {
    /// Brace imbalance while splitting an entry block out of the document
    #[error("Malformed entry at offset {offset}: braces never balance")]
    MalformedEntry {
        /// Byte offset of the `@` that opened the block
        offset: usize,
        /// Raw text of the offending block
        block: String,
    },

    /// The document contained no block that survived splitting and parsing
    #[error("No BibTeX entries found in input")]
    NoEntriesFound,

    /// Entry type not handled by any renderer
    #[error("Unsupported entry type '{0}': expected article, inproceedings, or an arXiv entry")]
    UnsupportedEntryType(String),

    /// Required field(s) absent for the detected entry type
    #[error("Missing required field(s) for {entry_type} entry: {}", .fields.join(", "))]
    MissingRequiredField {
        /// The entry type the router selected
        entry_type: String,
        /// Every absent field, not just the first
        fields: Vec<String>,
    },

    /// The venue dictionary resource could not be loaded
    #[error("Venue dictionary unavailable ({path}): {reason}")]
    DictionaryUnavailable {
        /// Path the load was attempted from
        path: String,
        /// What went wrong (missing file, invalid JSON, ...)
        reason: String,
    },

    /// Caller misuse, e.g. a key override with more than one entry present
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
