//! Unwrapping of list literals that arrive as plain strings.
//!
//! Upstream serializers sometimes store a multi-value field as the textual
//! rendering of a list, e.g. `"[20200101, 20200103]"` or
//! `"['20200101', '20200103']"`. [`parse_list`] reads that rendering back
//! into its elements. Elements are quoted strings or bare numeric tokens;
//! bare tokens are kept verbatim, never coerced to numbers.

use crate::error::LiteralError;

/// `true` when `s` looks like a bracketed list and should go through
/// [`parse_list`].
pub fn looks_like_list(s: &str) -> bool {
    s.starts_with('[') && s.ends_with(']')
}

/// Parse a bracketed, comma-separated list literal into its elements.
///
/// A trailing comma is allowed (`[a, b,]`), an empty slot is not (`[a,,b]`).
/// `[]` yields an empty list.
pub fn parse_list(s: &str) -> Result<Vec<String>, LiteralError> {
    if s.len() < 2 || !looks_like_list(s) {
        return Err(LiteralError::NotBracketed);
    }

    let body = &s[1..s.len() - 1];
    let mut items = Vec::new();
    let mut chars = body.char_indices().peekable();

    loop {
        skip_whitespace(&mut chars);

        let Some(&(start, c)) = chars.peek() else {
            break;
        };

        match c {
            '\'' | '"' => {
                chars.next();
                items.push(read_quoted(&mut chars, c, start + 1)?);
            }
            ',' => return Err(LiteralError::EmptyElement(start + 1)),
            '[' | ']' => return Err(LiteralError::UnexpectedChar { found: c, at: start + 1 }),
            _ => items.push(read_bare(&mut chars)?),
        }

        skip_whitespace(&mut chars);
        match chars.next() {
            None => break,
            Some((_, ',')) => continue,
            Some((at, found)) => return Err(LiteralError::UnexpectedChar { found, at: at + 1 }),
        }
    }

    Ok(items)
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

fn skip_whitespace(chars: &mut Chars<'_>) {
    while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
}

fn read_quoted(chars: &mut Chars<'_>, quote: char, start: usize) -> Result<String, LiteralError> {
    let mut out = String::new();
    loop {
        match chars.next() {
            None => return Err(LiteralError::UnterminatedString(start)),
            Some((_, c)) if c == quote => return Ok(out),
            Some((_, '\\')) => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => return Err(LiteralError::UnterminatedString(start)),
            },
            Some((_, c)) => out.push(c),
        }
    }
}

/// A bare token: a number such as `20200101`, `-5` or `20200101120000.5`.
fn read_bare(chars: &mut Chars<'_>) -> Result<String, LiteralError> {
    let mut token = String::new();
    while let Some((_, c)) = chars.next_if(|(_, c)| *c != ',' && !c.is_whitespace()) {
        token.push(c);
    }

    let digits = token.strip_prefix(['+', '-']).unwrap_or(&token);
    let numeric = digits.starts_with(|c: char| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '_');
    if !numeric {
        return Err(LiteralError::MalformedToken(token));
    }
    Ok(token)
}
