//! Front matter block grammar
//!
//! A block opens and closes with a line holding exactly `---`. Each line in
//! between is `key: value`, split on the first colon. Everything after the
//! closing delimiter is body and is left untouched in the reader.

use crate::core::Header;
use crate::error::{Result, SourceToolError};
use std::borrow::Cow;
use std::io::{BufRead, Write};
use std::path::Path;

pub const DELIMITER: &str = "---";

/// Result of scanning the top of a content file
#[derive(Debug, Default)]
pub struct ParsedFrontMatter {
    pub header: Header,
    pub has_block: bool,
    /// Bytes consumed while looking for an opening delimiter that turned out
    /// to be body. Always empty when `has_block` is set.
    pub preamble: Vec<u8>,
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && line[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    &line[..end]
}

pub fn is_delimiter(line: &[u8]) -> bool {
    trim_line_end(line) == DELIMITER.as_bytes()
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

/// Trim surrounding whitespace and one layer of wrapping double quotes.
///
/// A quoted field is unescaped, so `trim_field(&quote(s)) == s`. Bare fields
/// are kept verbatim, backslashes included.
pub fn trim_field(field: &str) -> Cow<'_, str> {
    let field = field.trim();
    match field.strip_prefix('"').and_then(|f| f.strip_suffix('"')) {
        Some(inner) => unescape(inner),
        None => Cow::Borrowed(field),
    }
}

/// Undo the escapes written by [`quote`]. Unknown escapes are kept as-is.
fn unescape(inner: &str) -> Cow<'_, str> {
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

/// Split a header line on its first colon
pub fn split_entry(line: &str) -> Option<(Cow<'_, str>, Cow<'_, str>)> {
    let (key, value) = line.split_once(':')?;
    Some((trim_field(key), trim_field(value)))
}

/// Wrap a value in double quotes, escaping what a YAML double-quoted scalar
/// cannot hold literally
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Read the front matter block from the top of `reader`.
///
/// On success the reader is positioned at the first body byte. `path` is
/// only used for error messages.
pub fn parse<R: BufRead>(reader: &mut R, path: &Path) -> Result<ParsedFrontMatter> {
    let mut parsed = ParsedFrontMatter::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| SourceToolError::read(path, e))?;
        if n == 0 {
            return Ok(parsed);
        }
        if is_delimiter(&line) {
            parsed.preamble.clear();
            parsed.has_block = true;
            break;
        }
        parsed.preamble.extend_from_slice(&line);
        if !is_blank(&line) {
            return Ok(parsed);
        }
    }

    let mut line_no = 0usize;
    loop {
        line.clear();
        line_no += 1;
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| SourceToolError::read(path, e))?;
        if n == 0 {
            return Err(SourceToolError::invalid_front_matter(
                path,
                "unterminated front matter block",
            ));
        }
        if is_delimiter(&line) {
            return Ok(parsed);
        }
        if is_blank(&line) {
            continue;
        }

        let text = std::str::from_utf8(&line).map_err(|_| {
            SourceToolError::invalid_front_matter(
                path,
                format!("header line {} is not valid UTF-8", line_no),
            )
        })?;
        let (key, value) = split_entry(text).ok_or_else(|| {
            SourceToolError::invalid_front_matter(
                path,
                format!("header line {} has no ':' ({:?})", line_no, text.trim_end()),
            )
        })?;
        if key.is_empty() {
            return Err(SourceToolError::invalid_front_matter(
                path,
                format!("header line {} has an empty key", line_no),
            ));
        }
        parsed.header.insert(key, value);
    }
}

/// Serialize `header` as a delimited block. Values of `quoted_keys` are
/// wrapped with [`quote`], as is any value that would not fit on one line;
/// all others are written as-is.
pub fn format<W: Write>(out: &mut W, header: &Header, quoted_keys: &[&str]) -> std::io::Result<()> {
    writeln!(out, "{}", DELIMITER)?;
    for (key, value) in header.iter() {
        if quoted_keys.contains(&key) || value.contains(['\n', '\r']) {
            writeln!(out, "{}: {}", key, quote(value))?;
        } else {
            writeln!(out, "{}: {}", key, value)?;
        }
    }
    writeln!(out, "{}", DELIMITER)
}
