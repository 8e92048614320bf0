//! Document splitting and entry parsing
//!
//! The splitter walks the raw input once, isolating every `@type{...}`
//! block by balanced-brace scanning and leaving everything else (prose,
//! `%` comments, `@comment`/`@string`/`@preamble` directives) as
//! passthrough spans that the pipeline reproduces byte-for-byte.

pub mod entry;
pub mod lexer;

use crate::error::Error;
use crate::warnings::WarningSink;

pub use entry::parse_block;

/// Internal parser result type
pub type PResult<'a, O> = winnow::PResult<O, winnow::error::ContextError>;

/// Entry types that are recognized but never rendered
const DIRECTIVE_TAGS: [&str; 3] = ["comment", "string", "preamble"];

/// One span of the input document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSpan<'a> {
    /// Text outside any entry block, reproduced unchanged in the output
    Passthrough(&'a str),
    /// A candidate entry block
    Block(EntryBlock<'a>),
}

/// A balanced `@type{...}` block located in the document
#[derive(Debug, Clone, PartialEq)]
pub struct EntryBlock<'a> {
    /// Byte offset of the `@`
    pub start: usize,
    /// Byte offset one past the balancing `}`
    pub end: usize,
    /// Entry type tag as written (case not normalized)
    pub type_tag: &'a str,
    /// The complete block text
    pub raw: &'a str,
}

/// Split a document into passthrough and entry-block spans.
///
/// Blocks whose braces never balance are dropped with one warning carrying
/// their raw text; scanning resumes at the next structural boundary so
/// later blocks still parse (the warning names the byte offset).
pub fn split_document<'a>(
    input: &'a str,
    warnings: &mut dyn WarningSink,
) -> Vec<DocumentSpan<'a>> {
    let bytes = input.as_bytes();
    let mut spans = Vec::new();
    let mut cursor = 0; // start of pending passthrough text
    let mut scan = 0;

    while let Some(found) = memchr::memchr(b'@', &bytes[scan..]) {
        let at = scan + found;
        let Some((tag_end, open_idx)) = block_open_at(input, at) else {
            scan = at + 1;
            continue;
        };
        let tag = &input[at + 1..tag_end];

        match lexer::find_block_end(input, open_idx) {
            Some(end) if is_directive(tag) => {
                // verbatim passthrough, merged into the pending span
                scan = end;
            }
            Some(end) => {
                if cursor < at {
                    spans.push(DocumentSpan::Passthrough(&input[cursor..at]));
                }
                spans.push(DocumentSpan::Block(EntryBlock {
                    start: at,
                    end,
                    type_tag: tag,
                    raw: &input[at..end],
                }));
                cursor = end;
                scan = end;
            }
            None => {
                let cut = malformed_block_end(input, open_idx);
                if cursor < at {
                    spans.push(DocumentSpan::Passthrough(&input[cursor..at]));
                }
                let block = input[at..cut].trim_end();
                let err = Error::MalformedEntry {
                    offset: at,
                    block: block.to_string(),
                };
                warnings.warn(&format!("{err}; the block was skipped:\n{block}"));
                cursor = cut;
                scan = cut;
            }
        }
    }

    if cursor < input.len() {
        spans.push(DocumentSpan::Passthrough(&input[cursor..]));
    }
    spans
}

fn is_directive(tag: &str) -> bool {
    DIRECTIVE_TAGS.iter().any(|d| tag.eq_ignore_ascii_case(d))
}

/// Check for `@identifier{` starting at `at` (which must point at `@`).
/// Returns the end of the tag and the index of the opening brace.
fn block_open_at(input: &str, at: usize) -> Option<(usize, usize)> {
    let bytes = input.as_bytes();
    let mut pos = at + 1;
    while pos < bytes.len() && is_tag_byte(bytes[pos]) {
        pos += 1;
    }
    if pos == at + 1 {
        return None;
    }
    let tag_end = pos;
    while pos < bytes.len() && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
        pos += 1;
    }
    if bytes.get(pos) == Some(&b'{') {
        Some((tag_end, pos))
    } else {
        None
    }
}

fn is_tag_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Where an unbalanced block ends: the next line that starts a new block,
/// a `%` comment line, a blank line, or EOF, whichever comes first.
fn malformed_block_end(input: &str, from: usize) -> usize {
    let bytes = input.as_bytes();
    let mut line_start = match memchr::memchr(b'\n', &bytes[from..]) {
        Some(nl) => from + nl + 1,
        None => return input.len(),
    };

    while line_start < input.len() {
        let line_end = memchr::memchr(b'\n', &bytes[line_start..])
            .map_or(input.len(), |nl| line_start + nl);
        let trimmed = input[line_start..line_end].trim_start();
        let is_boundary = trimmed.is_empty()
            || trimmed.starts_with('%')
            || (trimmed.starts_with('@') && block_open_at(trimmed, 0).is_some());
        if is_boundary {
            return line_start;
        }
        line_start = line_end + 1;
    }
    input.len()
}
