//! Title formatting
//!
//! Applies the house title-case while protecting spans the caser must not
//! touch: brace-wrapped acronyms, all-caps runs before a colon, and a
//! single-word pre-colon prefix (`deep:`, `COVID-19:`). Titles containing
//! raw LaTeX macros are passed through untouched and flagged so the
//! renderer can quote instead of double-brace them.

use crate::warnings::WarningSink;
use ahash::AHashSet;
use lazy_static::lazy_static;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Function words kept lowercase unless they open or close the title
    /// or follow a colon
    static ref SMALL_WORDS: AHashSet<&'static str> = [
        "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in",
        "of", "on", "or", "the", "to", "v", "v.", "via", "vs", "vs.", "with",
    ]
    .into_iter()
    .collect();
}

/// Marker delimiter for protected spans; a private-use character that
/// cannot occur in sane input
const MARKER: char = '\u{E000}';

/// A title after house-style formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTitle {
    /// The formatted text (verbatim input when `is_latex`)
    pub text: String,
    /// True when the title contains a raw LaTeX macro and must be quoted
    /// rather than double-braced
    pub is_latex: bool,
}

/// Format a raw title field value.
///
/// LaTeX-looking titles (a brace group containing a backslash) are
/// returned untouched with `is_latex` set and a caution sent to the sink;
/// case-folding accent macros would corrupt them.
#[must_use]
pub fn format_title(raw: &str, warnings: &mut dyn WarningSink) -> FormattedTitle {
    let title: String = raw.nfc().collect();

    if let Some(group) = find_latex_group(&title) {
        warnings.warn(&format!(
            "Title appears to contain a raw LaTeX command ({group}); \
             prefer writing characters directly: `{title}`"
        ));
        return FormattedTitle {
            text: title,
            is_latex: true,
        };
    }

    let mut protected: Vec<String> = Vec::new();
    let mut text = protect_brace_groups(&title, &mut protected);
    text = protect_before_colon(&text, &mut protected);
    text = title_case(&text);
    text = restore_protected(&text, &protected);

    FormattedTitle {
        text,
        is_latex: false,
    }
}

/// First brace group containing a backslash, e.g. `{\a}` or `{\"{a}`
fn find_latex_group(title: &str) -> Option<&str> {
    let bytes = title.as_bytes();
    for open in memchr::memchr_iter(b'{', bytes) {
        let Some(close) = memchr::memchr(b'}', &bytes[open..]) else {
            return None;
        };
        let span = &title[open..=open + close];
        if span.contains('\\') {
            return Some(span);
        }
    }
    None
}

fn marker_for(index: usize) -> String {
    format!("{MARKER}{index}{MARKER}")
}

/// Replace every balanced brace group with a marker, recording its content
/// (braces dropped) for verbatim restoration
fn protect_brace_groups(title: &str, protected: &mut Vec<String>) -> String {
    let mut out = String::with_capacity(title.len());
    let mut rest = title;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        match crate::parser::lexer::find_block_end(rest, open) {
            Some(end) => {
                protected.push(rest[open + 1..end - 1].to_string());
                out.push_str(&marker_for(protected.len() - 1));
                rest = &rest[end..];
            }
            None => {
                // unbalanced brace: keep it literal
                out.push('{');
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Protect the region before the first colon: the whole prefix when it is
/// a single word, otherwise every run of 2+ consecutive uppercase letters
fn protect_before_colon(text: &str, protected: &mut Vec<String>) -> String {
    let Some(colon) = text.find([':', '：']) else {
        return text.to_string();
    };
    let (before, after) = text.split_at(colon);

    let trimmed = before.trim();
    if !trimmed.is_empty() && !trimmed.contains(char::is_whitespace) {
        let lead = &before[..before.len() - before.trim_start().len()];
        let trail = &before[before.trim_end().len()..];
        let resolved = restore_protected(trimmed, protected);
        protected.push(resolved);
        let marker = marker_for(protected.len() - 1);
        return format!("{lead}{marker}{trail}{after}");
    }

    let mut out = protect_acronym_runs(before, protected);
    out.push_str(after);
    out
}

fn protect_acronym_runs(segment: &str, protected: &mut Vec<String>) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_uppercase() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_uppercase() {
                i += 1;
            }
            let boundary_before = start == 0 || !chars[start - 1].is_alphanumeric();
            let boundary_after = i >= chars.len() || !chars[i].is_alphanumeric();
            if i - start >= 2 && boundary_before && boundary_after {
                protected.push(chars[start..i].iter().collect());
                out.push_str(&marker_for(protected.len() - 1));
            } else {
                out.extend(&chars[start..i]);
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Capitalize each word except mid-title small words; words holding a
/// protection marker pass through untouched
fn title_case(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let last = words.len().saturating_sub(1);

    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        if word.contains(MARKER) {
            out.push((*word).to_string());
            continue;
        }

        let after_colon = i > 0 && words[i - 1].ends_with([':', '：']);
        let boundary = i == 0 || i == last || after_colon;
        if !boundary && is_small_word(word) {
            out.push(word.to_lowercase());
        } else {
            out.push(capitalize_first(word));
        }
    }
    out.join(" ")
}

fn is_small_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    let trimmed = lower.trim_end_matches([',', ';', ':', '：']);
    SMALL_WORDS.contains(trimmed)
}

/// Uppercase the first alphabetic character, leaving the rest unchanged
fn capitalize_first(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut capitalized = false;
    for c in word.chars() {
        if !capitalized && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            capitalized = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Substitute markers back with their recorded spans, by index
fn restore_protected(text: &str, protected: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != MARKER {
            out.push(c);
            continue;
        }
        let mut index = 0usize;
        for d in chars.by_ref() {
            if d == MARKER {
                break;
            }
            index = index * 10 + d.to_digit(10).map_or(0, |v| v as usize);
        }
        if let Some(span) = protected.get(index) {
            out.push_str(span);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::{DiscardWarnings, WarningLog};
    use pretty_assertions::assert_eq;

    fn fmt(raw: &str) -> FormattedTitle {
        format_title(raw, &mut DiscardWarnings)
    }

    #[test]
    fn plain_title_is_cased() {
        let t = fmt("an interesting paper");
        assert_eq!(t.text, "An Interesting Paper");
        assert!(!t.is_latex);
    }

    #[test]
    fn small_words_stay_lowercase_mid_title() {
        let t = fmt("Efficient Estimation of Word Representations in Vector Space");
        assert_eq!(
            t.text,
            "Efficient Estimation of Word Representations in Vector Space"
        );
    }

    #[test]
    fn small_word_capitalized_at_boundaries() {
        assert_eq!(fmt("the art of computer programming").text, "The Art of Computer Programming");
        assert_eq!(fmt("something to live for").text, "Something to Live For");
    }

    #[test]
    fn braced_groups_are_preserved_and_unwrapped() {
        let t = fmt("A {Normal} Title");
        assert_eq!(t.text, "A Normal Title");

        let t = fmt("a study of {GPT} and friends");
        assert_eq!(t.text, "A Study of GPT and Friends");

        let t = fmt("the {impact} of AI: a comprehensive study");
        assert_eq!(t.text, "The impact of AI: A Comprehensive Study");
    }

    #[test]
    fn single_word_prefix_before_colon_is_protected() {
        assert_eq!(
            fmt("deep: A Study on Something").text,
            "deep: A Study on Something"
        );
        assert_eq!(
            fmt("e-mail: The Future of Communication").text,
            "e-mail: The Future of Communication"
        );
        assert_eq!(
            fmt("COVID-19: A Global Challenge").text,
            "COVID-19: A Global Challenge"
        );
    }

    #[test]
    fn multi_word_prefix_is_cased_normally() {
        assert_eq!(fmt("a deep study: an analysis").text, "A Deep Study: An Analysis");
    }

    #[test]
    fn acronym_runs_before_colon_survive() {
        let t = fmt("Attention AT Scale: a study");
        assert_eq!(t.text, "Attention AT Scale: A Study");
    }

    #[test]
    fn fullwidth_colon_counts() {
        assert_eq!(
            fmt("deep： A Study on Something").text,
            "deep： A Study on Something"
        );
    }

    #[test]
    fn latex_title_is_passed_through_with_warning() {
        let mut log = WarningLog::new();
        let t = format_title(r"A {Title} with {\a} LaTeX command", &mut log);
        assert!(t.is_latex);
        assert_eq!(t.text, r"A {Title} with {\a} LaTeX command");
        assert_eq!(log.len(), 1);
        assert!(log.messages()[0].contains(r"{\a}"));
    }

    #[test]
    fn nested_accent_macro_is_latex() {
        let mut log = WarningLog::new();
        let t = format_title(r#"A Title with {\"{a}} symbol"#, &mut log);
        assert!(t.is_latex);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn accent_macros_are_detected() {
        for cmd in [r"{\^o}", r#"{\"u}"#, r"{\~n}", r"{\c c}", r"{\guillemotleft}"] {
            let mut log = WarningLog::new();
            let t = format_title(&format!("A Title with {cmd} inside"), &mut log);
            assert!(t.is_latex, "{cmd} should flag latex");
            assert!(log.messages()[0].contains(cmd), "{cmd} missing from warning");
        }
    }

    #[test]
    fn no_latex_no_warning() {
        let mut log = WarningLog::new();
        let t = format_title("A Title without commands", &mut log);
        assert!(!t.is_latex);
        assert!(log.is_empty());
    }

    #[test]
    fn already_formatted_title_is_stable() {
        let first = fmt("Efficient Estimation of Word Representations in Vector Space");
        let second = fmt(&first.text);
        assert_eq!(first, second);
    }
}
