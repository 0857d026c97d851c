//! Value codec for astrotext entries
//!
//! An entry value is stored on a single line. Newlines, carriage returns,
//! tabs and backslashes inside the value are written as two-character escape
//! sequences:
//!
//! | In memory | On disk |
//! |-----------|---------|
//! | newline   | `\n`    |
//! | CR        | `\r`    |
//! | tab       | `\t`    |
//! | `\`       | `\\`    |
//!
//! Any other backslash sequence is not an error: `decode` keeps it literally.
//! Because `encode` always doubles a backslash, `encode(decode(raw))` is not
//! the identity for raw text containing such sequences (`\x` comes back as
//! `\\x`). Only `decode(encode(value)) == value` is guaranteed.

/// Decode an on-disk value into its in-memory form
///
/// # Example
/// ```ignore
/// assert_eq!(decode(r"line1\nline2"), "line1\nline2");
/// assert_eq!(decode(r"C:\path"), r"C:\path");
/// ```
pub fn decode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let replacement = match chars.peek() {
            Some('n') => Some('\n'),
            Some('r') => Some('\r'),
            Some('t') => Some('\t'),
            Some('\\') => Some('\\'),
            _ => None,
        };

        match replacement {
            Some(decoded) => {
                out.push(decoded);
                chars.next();
            }
            // Unrecognized or trailing backslash: keep it and let the next
            // character be read on its own.
            None => out.push('\\'),
        }
    }

    out
}

/// Encode an in-memory value into its single-line on-disk form
pub fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
