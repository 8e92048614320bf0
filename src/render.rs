//! Type routing and entry rendering
//!
//! Each recognized entry shape gets its own renderer with a fixed field
//! order. Rendering is a linear pipeline of pure entry transforms (URL
//! cleaning, arXiv journal synthesis) followed by string emission in the
//! house quoting convention: every field as `key = "value"` except the
//! title, which is double-braced (or plain-quoted when it carries LaTeX).

use crate::error::{Error, Result};
use crate::model::{AbbrevMode, EntryType, ParsedEntry};
use crate::title;
use crate::venue::{self, VenueAbbreviation, VenueDictionary, VenueKind};
use crate::warnings::WarningSink;

/// The closed set of renderers an entry can be dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// Journal article
    Article,
    /// Conference paper
    InProceedings,
    /// arXiv preprint (minimal field set, emitted as `@article`)
    Arxiv,
}

impl Renderer {
    fn entry_type_name(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::InProceedings => "inproceedings",
            Self::Arxiv => "arxiv",
        }
    }
}

/// Decide which renderer handles an entry.
///
/// An `eprint` field or a literal `arXiv` token anywhere in the raw block
/// takes priority over the entry type; the token match is case-sensitive
/// on purpose so that plain `arxiv.org` URLs do not reroute a conference
/// paper.
pub fn route(entry: &ParsedEntry, raw_block: &str) -> Result<Renderer> {
    if entry.has("eprint") || raw_block.contains("arXiv") {
        return Ok(Renderer::Arxiv);
    }
    match entry.ty {
        EntryType::InProceedings => Ok(Renderer::InProceedings),
        EntryType::Article => Ok(Renderer::Article),
        _ => Err(Error::UnsupportedEntryType(entry.ty.to_string())),
    }
}

/// Render one normalized entry to its canonical text
pub fn render_entry(
    entry: &ParsedEntry,
    raw_block: &str,
    dict: &VenueDictionary,
    mode: AbbrevMode,
    warnings: &mut dyn WarningSink,
) -> Result<String> {
    let renderer = route(entry, raw_block)?;

    let entry = clean_url(entry.clone());
    let entry = match renderer {
        Renderer::Arxiv => synthesize_arxiv_journal(entry),
        _ => entry,
    };
    check_required(&entry, renderer)?;

    Ok(match renderer {
        Renderer::Article => render_article(&entry, dict, mode, warnings),
        Renderer::InProceedings => render_inproceedings(&entry, dict, mode, warnings),
        Renderer::Arxiv => render_arxiv(&entry, warnings),
    })
}

/// Strip chat-paste artifacts from the `url` field: Slack-style
/// `<url|url>` wrappers, angle brackets, one trailing slash
#[must_use]
pub fn clean_url(mut entry: ParsedEntry) -> ParsedEntry {
    if let Some(url) = entry.get("url") {
        let mut cleaned = url.split('|').next().unwrap_or_default();
        cleaned = cleaned.trim_start_matches('<').trim_end_matches('>');
        cleaned = cleaned.strip_suffix('/').unwrap_or(cleaned);
        let cleaned = cleaned.to_string();
        entry.set("url", cleaned);
    }
    entry
}

/// Give arXiv entries a `journal` field built from the `eprint`
/// identifier; an existing `journal` is kept when there is no `eprint`
#[must_use]
pub fn synthesize_arxiv_journal(mut entry: ParsedEntry) -> ParsedEntry {
    if let Some(eprint) = entry.get("eprint") {
        let journal = format!("arXiv:{eprint}");
        entry.set("journal", journal);
    }
    entry
}

fn check_required(entry: &ParsedEntry, renderer: Renderer) -> Result<()> {
    let mut missing = Vec::new();
    for field in ["title", "author"] {
        if !entry.has(field) {
            missing.push(field.to_string());
        }
    }
    match renderer {
        Renderer::Article => {
            if !entry.has("journal") {
                missing.push("journal".to_string());
            }
        }
        Renderer::InProceedings => {
            if !entry.has("booktitle") {
                missing.push("booktitle".to_string());
            }
        }
        // synthesis already ran: journal is present iff eprint or journal was
        Renderer::Arxiv => {
            if !entry.has("journal") {
                missing.push("eprint".to_string());
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingRequiredField {
            entry_type: renderer.entry_type_name().to_string(),
            fields: missing,
        })
    }
}

fn render_article(
    entry: &ParsedEntry,
    dict: &VenueDictionary,
    mode: AbbrevMode,
    warnings: &mut dyn WarningSink,
) -> String {
    let mut lines = vec![format!("@article{{{},", entry.key)];
    push_title(&mut lines, entry.get("title").unwrap_or_default(), warnings);
    push_quoted(
        &mut lines,
        "author",
        &format_authors(entry.get("author").unwrap_or_default(), false),
    );

    let abbrev = venue::abbreviate(
        dict,
        entry.get("journal").unwrap_or_default(),
        VenueKind::Journal,
        warnings,
    );
    push_venue(&mut lines, "journal", &abbrev, VenueKind::Journal, mode);

    for field in ["volume", "number", "pages", "year", "url"] {
        if let Some(value) = entry.get(field).filter(|v| !v.is_empty()) {
            push_quoted(&mut lines, field, value);
        }
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn render_inproceedings(
    entry: &ParsedEntry,
    dict: &VenueDictionary,
    mode: AbbrevMode,
    warnings: &mut dyn WarningSink,
) -> String {
    let mut lines = vec![format!("@inproceedings{{{},", entry.key)];
    push_title(&mut lines, entry.get("title").unwrap_or_default(), warnings);
    push_quoted(
        &mut lines,
        "author",
        &format_authors(entry.get("author").unwrap_or_default(), true),
    );

    let abbrev = venue::abbreviate(
        dict,
        entry.get("booktitle").unwrap_or_default(),
        VenueKind::Conference,
        warnings,
    );
    push_venue(&mut lines, "booktitle", &abbrev, VenueKind::Conference, mode);

    for field in ["pages", "year", "url"] {
        if let Some(value) = entry.get(field).filter(|v| !v.is_empty()) {
            push_quoted(&mut lines, field, value);
        }
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn render_arxiv(entry: &ParsedEntry, warnings: &mut dyn WarningSink) -> String {
    let mut lines = vec![format!("@article{{{},", entry.key)];
    push_title(&mut lines, entry.get("title").unwrap_or_default(), warnings);
    push_quoted(
        &mut lines,
        "author",
        &format_authors(entry.get("author").unwrap_or_default(), false),
    );
    push_quoted(&mut lines, "journal", entry.get("journal").unwrap_or_default());

    for field in ["year", "url"] {
        if let Some(value) = entry.get(field).filter(|v| !v.is_empty()) {
            push_quoted(&mut lines, field, value);
        }
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn push_title(lines: &mut Vec<String>, raw_title: &str, warnings: &mut dyn WarningSink) {
    let formatted = title::format_title(raw_title, warnings);
    if formatted.is_latex {
        // double-bracing a LaTeX title would corrupt macro grouping
        push_quoted(lines, "title", &formatted.text);
    } else {
        lines.push(format!("    title = {{{{{}}}}},", formatted.text));
    }
}

fn push_quoted(lines: &mut Vec<String>, name: &str, value: &str) {
    let safe = value.replace('"', "\\\"");
    lines.push(format!("    {name} = \"{safe}\","));
}

/// Emit the venue field per the abbreviation mode. Conference short forms
/// carry a `Proc. of ` prefix; a collapsed abbreviation (short == long)
/// always emits exactly one line so single-word venues never duplicate.
fn push_venue(
    lines: &mut Vec<String>,
    name: &str,
    abbrev: &VenueAbbreviation,
    kind: VenueKind,
    mode: AbbrevMode,
) {
    if abbrev.is_collapsed() {
        push_quoted(lines, name, &abbrev.long);
        return;
    }

    let short_line = match kind {
        VenueKind::Conference => format!("Proc. of {}", abbrev.short),
        VenueKind::Journal => abbrev.short.clone(),
    };

    match mode {
        AbbrevMode::Short => push_quoted(lines, name, &short_line),
        AbbrevMode::Long => push_quoted(lines, name, &abbrev.long),
        AbbrevMode::Both => {
            if short_line == abbrev.long {
                push_quoted(lines, name, &abbrev.long);
            } else {
                push_quoted(lines, name, &short_line);
                push_quoted(lines, name, &abbrev.long);
            }
        }
    }
}

/// Join authors split on the literal ` and ` separator. Line-break style
/// puts each author on its own continuation line; lists are never
/// truncated.
#[must_use]
pub fn format_authors(raw: &str, line_breaks: bool) -> String {
    let authors: Vec<&str> = raw
        .split(" and ")
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect();
    let separator = if line_breaks { " and\n      " } else { " and " };
    authors.join(separator)
}
