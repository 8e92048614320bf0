//! Lexical analysis for BibTeX blocks

use super::PResult;
use winnow::prelude::*;
use winnow::token::take_while;

/// Parse an identifier (letters, numbers, underscores, hyphens, colons, dots)
pub fn identifier<'a>(input: &mut &'a str) -> PResult<'a, &'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || c == '_' || c == '-' || c == ':' || c == '.' || c == '+'
    })
    .parse_next(input)
}

/// Scan from an opening brace to its balancing close, backslash-aware.
///
/// `open` must be the byte index of a `{` in `text`. Returns the index one
/// past the balancing `}`, or `None` when depth never returns to zero.
/// Escaped braces (`\{`, `\}`) do not count toward the depth.
#[must_use]
pub fn find_block_end(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&b'{'));

    let mut depth = 0usize;
    let mut pos = open;
    while let Some(found) = memchr::memchr3(b'{', b'}', b'\\', &bytes[pos..]) {
        pos += found;
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + 1);
                }
            }
            // skip the escaped character
            b'\\' => pos += 1,
            _ => unreachable!(),
        }
        pos += 1;
        if pos >= bytes.len() {
            break;
        }
    }
    None
}

/// Parse content up to an unmatched closing brace (the brace is not consumed)
pub fn balanced_braces<'a>(input: &mut &'a str) -> PResult<'a, &'a str> {
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0;

    while let Some(found) = memchr::memchr3(b'{', b'}', b'\\', &bytes[pos..]) {
        pos += found;
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                if depth == 0 {
                    let result = &input[..pos];
                    *input = &input[pos..];
                    return Ok(result);
                }
                depth -= 1;
            }
            b'\\' => pos += 1,
            _ => unreachable!(),
        }
        pos += 1;
        if pos >= bytes.len() {
            break;
        }
    }

    Err(winnow::error::ErrMode::Backtrack(
        winnow::error::ContextError::default(),
    ))
}

/// Parse a quoted string `"..."`, tolerating braced groups and escapes inside
pub fn quoted_string<'a>(input: &mut &'a str) -> PResult<'a, &'a str> {
    let start = *input;
    let bytes = input.as_bytes();

    if bytes.first() != Some(&b'"') {
        return Err(winnow::error::ErrMode::Backtrack(
            winnow::error::ContextError::default(),
        ));
    }

    let mut pos = 1;
    let mut brace_depth = 0usize;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' if pos + 1 < bytes.len() => pos += 2,
            b'"' if brace_depth == 0 => {
                let result = &start[1..pos];
                *input = &start[pos + 1..];
                return Ok(result);
            }
            b'{' => {
                brace_depth += 1;
                pos += 1;
            }
            b'}' if brace_depth > 0 => {
                brace_depth -= 1;
                pos += 1;
            }
            _ => pos += 1,
        }
    }

    Err(winnow::error::ErrMode::Backtrack(
        winnow::error::ContextError::default(),
    ))
}

/// Fast whitespace skipping
pub fn skip_whitespace(input: &mut &str) {
    let bytes = input.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b' ' | b'\t' | b'\n' | b'\r' => pos += 1,
            _ => break,
        }
    }
    *input = &input[pos..];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        let mut input = "smith2024:learning xxx";
        let result = identifier(&mut input).unwrap();
        assert_eq!(result, "smith2024:learning");
        assert_eq!(input, " xxx");
    }

    #[test]
    fn test_find_block_end_nested() {
        let text = "@article{k, title = {a {nested} value}}tail";
        let open = text.find('{').unwrap();
        let end = find_block_end(text, open).unwrap();
        assert_eq!(&text[..end], "@article{k, title = {a {nested} value}}");
    }

    #[test]
    fn test_find_block_end_accented_value() {
        let text = r#"@article{k, author = {M{\"{u}}ller}}"#;
        let open = text.find('{').unwrap();
        assert_eq!(find_block_end(text, open), Some(text.len()));
    }

    #[test]
    fn test_find_block_end_unbalanced() {
        let text = "@article{k, title = {oops}";
        let open = text.find('{').unwrap();
        assert_eq!(find_block_end(text, open), None);
    }

    #[test]
    fn test_balanced_braces() {
        let mut input = "hello {nested {braces}} world} xxx";
        let result = balanced_braces(&mut input).unwrap();
        assert_eq!(result, "hello {nested {braces}} world");
        assert_eq!(input, "} xxx");
    }

    #[test]
    fn test_quoted_string() {
        let mut input = r#""hello \"world\"" xxx"#;
        let result = quoted_string(&mut input).unwrap();
        assert_eq!(result, r#"hello \"world\""#);
        assert_eq!(input, " xxx");

        let mut input = r#""hello {world}" xxx"#;
        let result = quoted_string(&mut input).unwrap();
        assert_eq!(result, "hello {world}");
    }
}
