use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use thiserror::Error;

use crate::element::IndexedElement;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: invalid integer '{token}'")]
    InvalidInteger { line: usize, token: String },

    #[error("line {line}: '{token}' is out of range for {target}")]
    OutOfRange {
        line: usize,
        token: String,
        target: &'static str,
    },

    #[error("input has more than {} lines", u32::MAX)]
    TooManyLines,
}

/// Non-blank tokens of `data` with their 0-based line numbers.
///
/// Tokens are trimmed of ASCII whitespace, which also drops the `\r` of CRLF
/// input.
pub fn tokens(data: &[u8], delimiter: u8) -> impl Iterator<Item = (usize, &[u8])> {
    let mut start = 0usize;
    let mut line = 0usize;
    let mut ends = memchr::memchr_iter(delimiter, data).chain(std::iter::once(data.len()));

    std::iter::from_fn(move || {
        loop {
            let end = ends.next()?;
            let raw = &data[start..end];
            let current = line;
            start = end + 1;
            line += 1;
            let token = raw.trim_ascii();
            if !token.is_empty() {
                return Some((current, token));
            }
        }
    })
}

/// Parse one decimal integer token.
pub fn parse_token<K>(token: &[u8], line: usize) -> Result<K, ParseError>
where
    K: FromStr<Err = ParseIntError>,
{
    let invalid = || ParseError::InvalidInteger {
        line: line + 1,
        token: String::from_utf8_lossy(token).into_owned(),
    };
    let text = std::str::from_utf8(token).map_err(|_| invalid())?;
    text.parse::<K>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseError::OutOfRange {
            line: line + 1,
            token: text.to_string(),
            target: std::any::type_name::<K>(),
        },
        _ => invalid(),
    })
}

/// Parse every non-blank line of `data` as a key.
pub fn parse_keys<K>(data: &[u8], delimiter: u8) -> Result<Vec<K>, ParseError>
where
    K: FromStr<Err = ParseIntError>,
{
    let mut out = Vec::with_capacity(data.len() / 8 + 1);
    for (line, token) in tokens(data, delimiter) {
        out.push(parse_token(token, line)?);
    }
    Ok(out)
}

/// Parse every non-blank line of `data` as a key paired with its 0-based line
/// number.
pub fn parse_indexed<K>(data: &[u8], delimiter: u8) -> Result<Vec<IndexedElement<K>>, ParseError>
where
    K: FromStr<Err = ParseIntError>,
{
    let mut out = Vec::with_capacity(data.len() / 8 + 1);
    for (line, token) in tokens(data, delimiter) {
        let payload = u32::try_from(line).map_err(|_| ParseError::TooManyLines)?;
        out.push(IndexedElement::new(parse_token(token, line)?, payload));
    }
    Ok(out)
}

/// Parse a count like "64K", "1M" or "2G" (binary multiples).
pub fn parse_count(s: &str) -> Result<usize, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty count".to_string());
    }

    let (num_part, suffix) = if s.ends_with(|c: char| c.is_ascii_alphabetic()) {
        let (n, sfx) = s.split_at(s.len() - 1);
        (n, sfx.chars().next())
    } else {
        (s, None)
    };

    let base: usize = num_part
        .parse()
        .map_err(|_| format!("invalid count: {}", s))?;

    let multiplier: usize = match suffix {
        Some('K') | Some('k') => 1024,
        Some('M') | Some('m') => 1024 * 1024,
        Some('G') | Some('g') => 1024 * 1024 * 1024,
        Some(c) => return Err(format!("invalid suffix '{}' in count", c)),
        None => 1,
    };

    base.checked_mul(multiplier)
        .ok_or_else(|| format!("count too large: {}", s))
}
