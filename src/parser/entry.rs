//! Entry-block parsing
//!
//! Turns the raw text of one `@type{...}` block into a [`RawEntry`]. String
//! variables are out of scope here: a bare word used as a value is kept as
//! its literal text, and `#` concatenations are joined directly.

use super::{lexer, PResult};
use crate::model::{EntryType, RawEntry, RawField};
use std::borrow::Cow;
use winnow::ascii::multispace0;
use winnow::combinator::{alt, preceded, separated};
use winnow::prelude::*;

/// Make a parser whitespace-insensitive
fn ws<'a, F, O>(mut parser: F) -> impl Parser<&'a str, O, winnow::error::ContextError>
where
    F: Parser<&'a str, O, winnow::error::ContextError>,
{
    move |input: &mut &'a str| {
        let _ = multispace0.parse_next(input)?;
        let output = parser.parse_next(input)?;
        let _ = multispace0.parse_next(input)?;
        Ok(output)
    }
}

/// Parse one complete entry block
pub fn parse_block<'a>(input: &mut &'a str) -> PResult<'a, RawEntry<'a>> {
    let ty_str = preceded((multispace0, '@'), lexer::identifier).parse_next(input)?;
    let ty = EntryType::parse(ty_str);

    lexer::skip_whitespace(input);
    ws('{').parse_next(input)?;

    let key = ws(lexer::identifier).parse_next(input)?;
    ws(',').parse_next(input)?;

    let fields = parse_fields.parse_next(input)?;
    ws('}').parse_next(input)?;

    Ok(RawEntry { ty, key, fields })
}

/// Parse all fields of an entry body
fn parse_fields<'a>(input: &mut &'a str) -> PResult<'a, Vec<RawField<'a>>> {
    let mut fields = Vec::new();

    loop {
        lexer::skip_whitespace(input);
        if input.starts_with('}') || input.is_empty() {
            break;
        }

        let field = parse_field(input)?;
        fields.push(field);

        lexer::skip_whitespace(input);
        if input.starts_with(',') {
            *input = &input[1..];
        } else if !input.starts_with('}') {
            return Err(winnow::error::ErrMode::Backtrack(
                winnow::error::ContextError::default(),
            ));
        }
    }

    Ok(fields)
}

/// Parse a single `name = value` field
fn parse_field<'a>(input: &mut &'a str) -> PResult<'a, RawField<'a>> {
    let name = ws(lexer::identifier).parse_next(input)?;
    ws('=').parse_next(input)?;
    let value = ws(parse_value).parse_next(input)?;
    Ok(RawField { name, value })
}

/// Parse a field value, flattening `#` concatenation into one string
fn parse_value<'a>(input: &mut &'a str) -> PResult<'a, Cow<'a, str>> {
    let parts: Vec<Cow<'a, str>> =
        separated(1.., parse_single_value, ws('#')).parse_next(input)?;

    let mut parts = parts;
    match parts.len() {
        1 => Ok(parts.pop().unwrap()),
        _ => Ok(Cow::Owned(parts.concat())),
    }
}

/// Parse one value component: quoted, braced, or a bare token (numbers
/// like `2013` and `1301.3781` included)
fn parse_single_value<'a>(input: &mut &'a str) -> PResult<'a, Cow<'a, str>> {
    alt((
        parse_quoted_value,
        parse_braced_value,
        lexer::identifier.map(Cow::Borrowed),
    ))
    .parse_next(input)
}

fn parse_quoted_value<'a>(input: &mut &'a str) -> PResult<'a, Cow<'a, str>> {
    lexer::quoted_string.map(Cow::Borrowed).parse_next(input)
}

fn parse_braced_value<'a>(input: &mut &'a str) -> PResult<'a, Cow<'a, str>> {
    if !input.starts_with('{') {
        return Err(winnow::error::ErrMode::Backtrack(
            winnow::error::ContextError::default(),
        ));
    }
    *input = &input[1..];
    let content = lexer::balanced_braces(input)?;
    if input.starts_with('}') {
        *input = &input[1..];
        Ok(Cow::Borrowed(content))
    } else {
        Err(winnow::error::ErrMode::Backtrack(
            winnow::error::ContextError::default(),
        ))
    }
}
