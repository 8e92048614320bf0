//! Venue-name cleaning and abbreviation
//!
//! A venue name arrives as whatever the upstream bibliography exported:
//! `Proceedings of the 1st International Conference on Learning
//! Representations`, `Transactions of the Association for Computational
//! Linguistics, Volume 4`, `Conference on Computer Vision and Pattern
//! Recognition (CVPR 2024)`. This module derives a canonical long form and
//! an abbreviated short form from a dictionary of known venues, falling
//! back to a parenthetical acronym or capitalized-word initials.

use crate::error::{Error, Result};
use crate::warnings::WarningSink;
use ahash::AHashMap;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Default location of the venue-name resource, relative to the process
/// working directory
pub const DEFAULT_DICTIONARY_PATH: &str = "resources/venue_names.json";

/// How many leading words a conference lookup may drop before giving up
const MAX_LEAD_DROPS: usize = 4;

/// Read-only mapping from full venue names to canonical abbreviations.
///
/// Loaded once at process start and shared by reference; concurrent reads
/// need no locking.
#[derive(Debug, Clone, Default)]
pub struct VenueDictionary {
    map: AHashMap<String, String>,
}

impl VenueDictionary {
    /// Load the dictionary from a JSON file: a flat object mapping full
    /// venue names to abbreviation strings.
    ///
    /// A missing or unreadable file and invalid JSON are both fatal
    /// preconditions ([`Error::DictionaryUnavailable`]), not per-entry
    /// conditions.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |reason: String| Error::DictionaryUnavailable {
            path: path.display().to_string(),
            reason,
        };

        let text = fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let map: HashMap<String, String> =
            serde_json::from_str(&text).map_err(|e| unavailable(e.to_string()))?;
        Ok(Self::from_map(map))
    }

    /// Load from [`DEFAULT_DICTIONARY_PATH`]
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_DICTIONARY_PATH)
    }

    /// Build a dictionary from in-memory pairs
    pub fn from_map<K, V>(map: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: map
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up the canonical abbreviation for a full venue name
    #[must_use]
    pub fn lookup(&self, full_name: &str) -> Option<&str> {
        self.map.get(full_name).map(String::as_str)
    }

    /// Number of known venues
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if the dictionary holds no venues
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Which kind of venue a name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueKind {
    /// A journal name from a `journal` field
    Journal,
    /// A conference/proceedings name from a `booktitle` field
    Conference,
}

impl VenueKind {
    fn noun(self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Conference => "conference",
        }
    }
}

/// The two canonical forms of one venue name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueAbbreviation {
    /// Cleaned full name
    pub long: String,
    /// Abbreviated name (equal to `long` when no abbreviation applies)
    pub short: String,
}

impl VenueAbbreviation {
    /// True when no abbreviation applies and only one line should be
    /// emitted regardless of mode
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.short == self.long
    }
}

/// Derive the long and short form of a venue name.
///
/// The long form keeps any `Proceedings of ...` preamble but loses colon
/// subtitles, `, Volume N` noise, brace wrapping, and (conferences only)
/// a trailing parenthetical. The short form comes from, in order: an
/// all-uppercase trailing parenthetical (conferences), the dictionary
/// (conferences retry with up to four leading words dropped), a
/// single-word name standing for itself, or capitalized-word initials —
/// the last is a guess and is reported through the warning sink.
#[must_use]
pub fn abbreviate(
    dict: &VenueDictionary,
    name: &str,
    kind: VenueKind,
    warnings: &mut dyn WarningSink,
) -> VenueAbbreviation {
    let mut base = resolve_braces(name);
    base = strip_subtitle(&base).to_string();
    base = strip_volume_clause(&base).to_string();

    if kind == VenueKind::Conference {
        if let Some((without, content)) = split_trailing_parenthetical(&base) {
            if let Some(acronym) = authoritative_acronym(&content) {
                return VenueAbbreviation {
                    long: without,
                    short: acronym,
                };
            }
            base = without;
        }
    }

    let long = base.trim().to_string();
    let lookup_key = match kind {
        VenueKind::Conference => strip_proceedings_preamble(&long),
        VenueKind::Journal => long.as_str(),
    };

    let hit = match kind {
        VenueKind::Conference => lookup_with_drops(dict, lookup_key),
        VenueKind::Journal => dict.lookup(lookup_key),
    };
    if let Some(short) = hit {
        return VenueAbbreviation {
            long,
            short: short.to_string(),
        };
    }

    if !lookup_key.contains(char::is_whitespace) {
        let short = long.clone();
        return VenueAbbreviation { long, short };
    }

    let initials = capitalized_initials(lookup_key);
    if initials.is_empty() {
        let short = long.clone();
        return VenueAbbreviation { long, short };
    }

    warnings.warn(&format!(
        "No known abbreviation for {} name \"{long}\"; guessed \"{initials}\" from initials",
        kind.noun()
    ));
    VenueAbbreviation {
        long,
        short: initials,
    }
}

/// Remove all brace characters, keeping the wrapped text
fn resolve_braces(s: &str) -> String {
    if !s.contains(['{', '}']) {
        return s.to_string();
    }
    s.chars().filter(|c| *c != '{' && *c != '}').collect()
}

/// Truncate at the first colon; many venues carry subtitle disambiguators
fn strip_subtitle(s: &str) -> &str {
    match s.find([':', '：']) {
        Some(idx) => s[..idx].trim_end(),
        None => s,
    }
}

/// Drop a trailing `, Volume N` / `, Vol. N` / `, No. N` clause and
/// everything after it
fn strip_volume_clause(s: &str) -> &str {
    for idx in memchr::memchr_iter(b',', s.as_bytes()) {
        let rest = s[idx + 1..].trim_start();
        if volume_keyword_with_number(rest) {
            return s[..idx].trim_end();
        }
    }
    s
}

fn volume_keyword_with_number(rest: &str) -> bool {
    for keyword in ["volume", "vol.", "vol", "no.", "no"] {
        let matches = rest
            .get(..keyword.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(keyword));
        if !matches {
            continue;
        }
        let after = &rest[keyword.len()..];
        if after.starts_with(char::is_whitespace)
            && after.trim_start().starts_with(|c: char| c.is_ascii_digit())
        {
            return true;
        }
    }
    false
}

/// Split off a trailing parenthetical suffix, accepting fullwidth
/// parentheses. Returns the name without it and the inner content.
fn split_trailing_parenthetical(s: &str) -> Option<(String, String)> {
    let trimmed = s.trim_end();
    let close_len = if trimmed.ends_with(')') {
        1
    } else if trimmed.ends_with('）') {
        '）'.len_utf8()
    } else {
        return None;
    };

    let open_idx = trimmed.rfind(['(', '（'])?;
    let open_len = trimmed[open_idx..].chars().next().map_or(1, char::len_utf8);
    let content = trimmed[open_idx + open_len..trimmed.len() - close_len].to_string();
    let without = trimmed[..open_idx].trim_end().to_string();
    if without.is_empty() {
        return None;
    }
    Some((without, content))
}

/// An all-uppercase parenthetical (year removed) is an authoritative
/// abbreviation: `(TALN)`, `(CVPR 2024)`, `(TSAR-2022)`
fn authoritative_acronym(content: &str) -> Option<String> {
    let mut text = resolve_braces(content);
    text = text.trim().to_string();

    // drop a trailing 4-digit year and its separator
    let without_year = text.trim_end_matches(|c: char| c.is_ascii_digit());
    if text.len() - without_year.len() == 4 {
        text = without_year
            .trim_end_matches(['-', '–', ' '])
            .to_string();
    }

    if text.is_empty() || !text.chars().any(char::is_alphabetic) {
        return None;
    }
    if text
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(char::is_uppercase)
    {
        Some(text)
    } else {
        None
    }
}

/// Strip a leading `Proceedings of [the] [Nth|YYYY]` preamble (also the
/// crate's own `Proc. of` output, so re-rendering stays stable)
fn strip_proceedings_preamble(s: &str) -> &str {
    let Some(rest) = strip_word_ci(s, "proceedings").or_else(|| strip_word_ci(s, "proc.")) else {
        return s;
    };
    let Some(rest) = strip_word_ci(rest, "of") else {
        return s;
    };
    let rest = strip_word_ci(rest, "the").unwrap_or(rest);
    let rest = strip_ordinal_or_year(rest).unwrap_or(rest);
    if rest.is_empty() {
        s
    } else {
        rest
    }
}

/// Strip one case-insensitive word plus the whitespace after it
fn strip_word_ci<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    let prefix = s.get(..word.len())?;
    if !prefix.eq_ignore_ascii_case(word) {
        return None;
    }
    let rest = &s[word.len()..];
    if rest.is_empty() {
        return Some(rest);
    }
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        // no whitespace boundary: matched inside a longer word
        return None;
    }
    Some(trimmed)
}

/// Strip a leading ordinal (`1st`, `23rd`) or 4-digit year token
fn strip_ordinal_or_year(s: &str) -> Option<&str> {
    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if digits_end == 0 {
        return None;
    }
    let after_digits = &s[digits_end..];

    if digits_end == 4 && after_digits.starts_with(char::is_whitespace) {
        return Some(after_digits.trim_start());
    }
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(rest) = after_digits.strip_prefix(suffix) {
            if rest.starts_with(char::is_whitespace) {
                return Some(rest.trim_start());
            }
        }
    }
    None
}

/// Progressively drop leading words to tolerate extra descriptive prefixes
fn lookup_with_drops<'d>(dict: &'d VenueDictionary, key: &str) -> Option<&'d str> {
    let mut current = key;
    for _ in 0..=MAX_LEAD_DROPS {
        if let Some(hit) = dict.lookup(current) {
            return Some(hit);
        }
        match current.split_once(char::is_whitespace) {
            Some((_, rest)) => current = rest.trim_start(),
            None => return None,
        }
    }
    None
}

/// First letter of every capitalized word
fn capitalized_initials(s: &str) -> String {
    s.split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_uppercase())
        .collect()
}
