//! # bibtex-simplifier
//!
//! Normalizes BibTeX citation entries into a consistent, abbreviated house
//! style: fixed field order, double-braced titles in title case, and
//! journal/conference names emitted in short, long, or both forms from a
//! dictionary of known venues.
//!
//! ## Features
//!
//! - Tolerant block splitting: prose and `%` comments around entries are
//!   reproduced byte-for-byte, malformed blocks are skipped with a warning
//! - Duplicate-field resolution (longest value wins)
//! - Venue abbreviation via dictionary lookup, trailing parenthetical
//!   acronyms, or capitalized-word initials as a flagged last resort
//! - Title casing that protects brace-wrapped acronyms and pre-colon
//!   prefixes, and leaves raw-LaTeX titles untouched
//! - Dedicated renderers for articles, conference papers, and arXiv
//!   preprints
//!
//! ## Example
//!
//! ```
//! use bibtex_simplifier::{Simplifier, VenueDictionary, WarningLog};
//!
//! let dict = VenueDictionary::from_map([
//!     ("International Conference on Learning Representations", "ICLR"),
//! ]);
//! let simplifier = Simplifier::new(dict);
//!
//! let raw = r#"@inproceedings{mikolov2013,
//!     title = {Efficient Estimation of Word Representations in Vector Space},
//!     author = "Tomas Mikolov and Kai Chen",
//!     booktitle = "Proceedings of the 1st International Conference on Learning Representations",
//!     year = "2013"
//! }"#;
//!
//! let mut warnings = WarningLog::new();
//! let output = simplifier.simplify(raw, None, &mut warnings)?;
//!
//! assert!(output.contains("booktitle = \"Proc. of ICLR\","));
//! assert!(output.contains("title = {{Efficient Estimation of Word Representations in Vector Space}},"));
//! assert!(warnings.is_empty());
//! # Ok::<(), bibtex_simplifier::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    missing_debug_implementations
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod error;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod render;
pub mod title;
pub mod venue;
pub mod warnings;

mod simplify;

pub use error::{Error, Result};
pub use model::{AbbrevMode, EntryType, ParsedEntry};
pub use simplify::Simplifier;
pub use title::FormattedTitle;
pub use venue::{VenueAbbreviation, VenueDictionary, VenueKind};
pub use warnings::{sink_fn, DiscardWarnings, FnSink, WarningLog, WarningSink};

/// Re-export of the common surface
pub mod prelude {
    pub use crate::{
        AbbrevMode, DiscardWarnings, Error, Result, Simplifier, VenueDictionary, WarningLog,
        WarningSink,
    };
}

/// Simplify a document with the default mode and discarded warnings
pub fn simplify(raw: &str, dict: &VenueDictionary) -> Result<String> {
    simplify::simplify_document(
        dict,
        AbbrevMode::default(),
        raw,
        None,
        &mut DiscardWarnings,
    )
}
