//! Properties-file syntax
//!
//! Reading follows the rules of `java.util.Properties.load`, which is the
//! format formatter preference files are exported in. Writing produces
//! ASCII-only text that reads back to the same mapping.

use std::collections::BTreeMap;
use std::fmt::Write;

/// Invalid escape sequence in a properties file
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    /// 1-based line where the offending logical line starts
    pub line: usize,
    /// Description of the problem
    pub message: String,
}

/// Parse properties text into a mapping; later duplicate keys win
///
/// # Errors
///
/// Returns an error if a `\uXXXX` escape is truncated or not hexadecimal.
pub fn parse(text: &str) -> Result<BTreeMap<String, String>, PropertiesError> {
    let mut entries = BTreeMap::new();

    for (line, logical) in logical_lines(text) {
        let (key, value) = split_entry(&logical);
        let key = unescape(key).map_err(|message| PropertiesError { line, message })?;
        let value = unescape(value).map_err(|message| PropertiesError { line, message })?;
        entries.insert(key, value);
    }

    Ok(entries)
}

/// Serialize a mapping as properties text, one `key=value` per line
#[must_use]
pub fn to_string<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut output = String::new();
    for (key, value) in entries {
        escape_into(&mut output, key, true);
        output.push('=');
        escape_into(&mut output, value, false);
        output.push('\n');
    }
    output
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// Join continuation lines and drop blanks and comments
///
/// Yields each logical line (escapes still in place) with the number of the
/// natural line it starts on.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut natural = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
        natural.push(&rest[..end]);
        rest = &rest[end..];
        if let Some(stripped) = rest.strip_prefix("\r\n") {
            rest = stripped;
        } else if !rest.is_empty() {
            rest = &rest[1..];
        }
    }

    let mut lines = Vec::new();
    let mut index = 0;
    while index < natural.len() {
        let start = index;
        let first = natural[index].trim_start_matches(is_blank);
        index += 1;

        if first.is_empty() || first.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = String::new();
        let mut segment = first;
        loop {
            if ends_with_continuation(segment) {
                logical.push_str(&segment[..segment.len() - 1]);
                match natural.get(index) {
                    Some(next) => {
                        segment = next.trim_start_matches(is_blank);
                        index += 1;
                    }
                    None => break,
                }
            } else {
                logical.push_str(segment);
                break;
            }
        }

        lines.push((start + 1, logical));
    }

    lines
}

fn ends_with_continuation(segment: &str) -> bool {
    segment.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped `=`, `:` or blank
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut value = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = value.strip_prefix(['=', ':']) {
        value = stripped.trim_start_matches(is_blank);
    }
    (key, value)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut output = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut output);
            output.push(c);
            continue;
        }

        let Some(escaped) = chars.next() else {
            break;
        };

        if escaped == 'u' {
            let digits: String = chars.by_ref().take(4).collect();
            if digits.chars().count() < 4 {
                return Err(format!("truncated \\u escape '\\u{digits}'"));
            }
            if !digits.chars().all(|d| d.is_ascii_hexdigit()) {
                return Err(format!("malformed \\u escape '\\u{digits}'"));
            }
            let unit = u16::from_str_radix(&digits, 16)
                .map_err(|_| format!("malformed \\u escape '\\u{digits}'"))?;
            units.push(unit);
            continue;
        }

        flush_units(&mut units, &mut output);
        output.push(match escaped {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{c}',
            other => other,
        });
    }

    flush_units(&mut units, &mut output);
    Ok(output)
}

fn flush_units(units: &mut Vec<u16>, output: &mut String) {
    if units.is_empty() {
        return;
    }
    output.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

fn escape_into(output: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => output.push_str("\\\\"),
            '\t' => output.push_str("\\t"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\u{c}' => output.push_str("\\f"),
            ' ' if is_key || i == 0 => output.push_str("\\ "),
            '=' | ':' | '#' | '!' => {
                output.push('\\');
                output.push(c);
            }
            ' '..='~' => output.push(c),
            _ => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    // Writing to a String cannot fail
                    let _ = write!(output, "\\u{unit:04X}");
                }
            }
        }
    }
}
