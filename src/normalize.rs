//! Field normalization and duplicate resolution
//!
//! Parsed fields arrive as written: mixed-case names, values spanning
//! multiple lines, and the occasional duplicated key from hand-merged
//! entries. Normalization lowercases names, collapses value whitespace,
//! and keeps exactly one value per name.

use crate::model::{ParsedEntry, RawEntry};

/// Normalize a parsed block into a [`ParsedEntry`].
///
/// Duplicate field names keep the longest value by character count; ties
/// keep the first occurrence. This is the documented, stable resolution
/// for entries where a `booktitle`/`journal` pair was merged by hand.
#[must_use]
pub fn normalize(raw: &RawEntry<'_>) -> ParsedEntry {
    let mut entry = ParsedEntry::new(raw.ty.clone(), raw.key);

    for field in &raw.fields {
        let name = field.name.to_lowercase();
        let value = collapse_whitespace(&field.value);

        let keep_existing = entry
            .get(&name)
            .is_some_and(|existing| value.chars().count() <= existing.chars().count());
        if !keep_existing {
            entry.set(name, value);
        }
    }

    entry
}

/// Collapse all runs of whitespace (including newlines from wrapped
/// values) into single spaces and trim the ends.
#[must_use]
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
