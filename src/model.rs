//! Data models for citation entries as they move through the pipeline

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// BibTeX entry type tag
///
/// Only `article` and `inproceedings` have renderers of their own; arXiv
/// preprints are detected separately (an `eprint` field or an `arXiv` token
/// in the raw block) and may arrive under any tag, commonly `misc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// Article from a journal
    Article,
    /// Article in conference proceedings
    InProceedings,
    /// Miscellaneous (the usual tag of arXiv exports)
    Misc,
    /// Any other entry type
    Custom(String),
}

impl EntryType {
    /// Parse from string (case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "article" => Self::Article,
            "inproceedings" | "conference" => Self::InProceedings,
            "misc" => Self::Misc,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Article => write!(f, "article"),
            Self::InProceedings => write!(f, "inproceedings"),
            Self::Misc => write!(f, "misc"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// A field as parsed from one entry block, borrowed from the document
#[derive(Debug, Clone, PartialEq)]
pub struct RawField<'a> {
    /// Field name as written (case not yet normalized)
    pub name: &'a str,
    /// Field value with delimiters stripped; borrowed unless concatenated
    pub value: Cow<'a, str>,
}

/// Parse output for one entry block, borrowed from the document
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry<'a> {
    /// Entry type tag
    pub ty: EntryType,
    /// Citation key
    pub key: &'a str,
    /// Fields in source order, duplicates still present
    pub fields: Vec<RawField<'a>>,
}

/// A normalized entry: lowercase field keys, whitespace collapsed,
/// duplicate fields resolved to the longest value
#[derive(Debug, Clone)]
pub struct ParsedEntry {
    /// Entry type tag
    pub ty: EntryType,
    /// Citation key
    pub key: String,
    fields: AHashMap<String, String>,
}

impl ParsedEntry {
    /// Create an entry with no fields
    #[must_use]
    pub fn new(ty: EntryType, key: impl Into<String>) -> Self {
        Self {
            ty,
            key: key.into(),
            fields: AHashMap::new(),
        }
    }

    /// Get a field value by its lowercase name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// True if the field is present and non-empty
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_empty())
    }

    /// Insert or replace a field value (name must already be lowercase)
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Remove a field, returning its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Number of distinct fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the entry has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Which venue-name forms the renderer emits for journal/booktitle fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbbrevMode {
    /// Abbreviated form only
    Short,
    /// Full form only
    Long,
    /// Abbreviated line first, full line second
    #[default]
    Both,
}
