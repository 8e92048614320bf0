//! Pipeline orchestration
//!
//! Ties the stages together: split the document into spans, parse and
//! normalize each entry block (recovering per block), route and render
//! every surviving entry, and reassemble the document with passthrough
//! text reproduced byte-for-byte.

use crate::error::{Error, Result};
use crate::model::{AbbrevMode, ParsedEntry};
use crate::normalize;
use crate::parser::{self, DocumentSpan};
use crate::render;
use crate::venue::VenueDictionary;
use crate::warnings::WarningSink;

/// Citation normalizer configured with a venue dictionary and an
/// abbreviation mode.
///
/// Construct one per process and share it: `simplify` takes `&self`, and
/// the dictionary is never mutated after load.
#[derive(Debug, Clone)]
pub struct Simplifier {
    dict: VenueDictionary,
    mode: AbbrevMode,
}

impl Simplifier {
    /// Create a simplifier with the default mode ([`AbbrevMode::Both`])
    #[must_use]
    pub fn new(dict: VenueDictionary) -> Self {
        Self {
            dict,
            mode: AbbrevMode::default(),
        }
    }

    /// Set the abbreviation mode
    #[must_use]
    pub const fn with_mode(mut self, mode: AbbrevMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured abbreviation mode
    #[must_use]
    pub const fn mode(&self) -> AbbrevMode {
        self.mode
    }

    /// The venue dictionary in use
    #[must_use]
    pub const fn dictionary(&self) -> &VenueDictionary {
        &self.dict
    }

    /// Normalize every entry block in `raw`, reproducing all other text
    /// unchanged.
    ///
    /// `new_key` overrides the citation key and is only legal when the
    /// document holds exactly one processable entry. Blocks that fail to
    /// split or parse are dropped with a warning; a document where no
    /// block survives is [`Error::NoEntriesFound`].
    pub fn simplify(
        &self,
        raw: &str,
        new_key: Option<&str>,
        warnings: &mut dyn WarningSink,
    ) -> Result<String> {
        simplify_document(&self.dict, self.mode, raw, new_key, warnings)
    }
}

enum Piece<'a> {
    Text(&'a str),
    Entry { parsed: ParsedEntry, raw: &'a str },
}

pub(crate) fn simplify_document(
    dict: &VenueDictionary,
    mode: AbbrevMode,
    raw: &str,
    new_key: Option<&str>,
    warnings: &mut dyn WarningSink,
) -> Result<String> {
    let spans = parser::split_document(raw, warnings);

    let mut pieces = Vec::with_capacity(spans.len());
    let mut entry_count = 0usize;
    for span in spans {
        match span {
            DocumentSpan::Passthrough(text) => pieces.push(Piece::Text(text)),
            DocumentSpan::Block(block) => {
                let mut input = block.raw;
                match parser::parse_block(&mut input) {
                    Ok(raw_entry) => {
                        entry_count += 1;
                        pieces.push(Piece::Entry {
                            parsed: normalize::normalize(&raw_entry),
                            raw: block.raw,
                        });
                    }
                    Err(_) => {
                        warnings.warn(&format!(
                            "Failed to parse BibTeX block at offset {}, skipping it:\n{}",
                            block.start,
                            block.raw.trim_end()
                        ));
                    }
                }
            }
        }
    }

    if entry_count == 0 {
        return Err(Error::NoEntriesFound);
    }
    if new_key.is_some() && entry_count > 1 {
        return Err(Error::InvalidArgument(format!(
            "a key override requires exactly one entry, found {entry_count}"
        )));
    }

    let mut out = String::with_capacity(raw.len());
    for piece in pieces {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Entry { mut parsed, raw: block_raw } => {
                if let Some(key) = new_key {
                    parsed.key = key.to_string();
                }
                let rendered =
                    render::render_entry(&parsed, block_raw, dict, mode, warnings)?;
                out.push_str(&rendered);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::{DiscardWarnings, WarningLog};

    fn simplifier() -> Simplifier {
        Simplifier::new(VenueDictionary::from_map([(
            "International Conference on Learning Representations",
            "ICLR",
        )]))
    }

    #[test]
    fn no_entries_is_an_error() {
        let err = simplifier()
            .simplify("just prose, no entries", None, &mut DiscardWarnings)
            .unwrap_err();
        assert!(matches!(err, Error::NoEntriesFound));
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = simplifier()
            .simplify("", None, &mut DiscardWarnings)
            .unwrap_err();
        assert!(matches!(err, Error::NoEntriesFound));
    }

    #[test]
    fn new_key_with_two_entries_is_rejected() {
        let raw = "@article{a, title={T}, author={A}, journal={Nature}}\n\
                   @article{b, title={U}, author={B}, journal={Nature}}";
        let err = simplifier()
            .simplify(raw, Some("override"), &mut DiscardWarnings)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn new_key_overrides_single_entry() {
        let raw = "@article{old, title={T}, author={A}, journal={Nature}}";
        let out = simplifier()
            .simplify(raw, Some("fresh2024"), &mut DiscardWarnings)
            .unwrap();
        assert!(out.starts_with("@article{fresh2024,"));
        assert!(!out.contains("old"));
    }

    #[test]
    fn unparseable_block_is_skipped_with_warning() {
        let raw = "@article{bad, title = }\n\n@article{ok, title={T}, author={A}, journal={Nature}}";
        let mut log = WarningLog::new();
        let out = simplifier().simplify(raw, None, &mut log).unwrap();
        assert!(out.contains("@article{ok,"));
        assert!(!out.contains("bad"));
        assert_eq!(log.len(), 1);
        assert!(log.messages()[0].contains("@article{bad, title = }"));
    }
}
