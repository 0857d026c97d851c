//! Line model for astrotext resource files
//!
//! A resource file is a flat sequence of lines. `[name]` opens a section that
//! runs until the next header. Inside a section, lines are blank, comments
//! (`#` or `;`), or `key=value` entries. Everything else is tolerated and
//! passed through by the rewriter.

/// Section holding the German source text
pub const SOURCE_SECTION: &str = "de";

/// Section holding the English text kept in sync with the source
pub const TARGET_SECTION: &str = "en";

/// Classification of a single raw line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `[name]` header, carrying the trimmed inner name
    Header(&'a str),
    /// Empty or whitespace-only line
    Blank,
    /// Line starting with `#` or `;` after trimming
    Comment,
    /// `key=value` entry
    Entry {
        /// Text before the first `=`, trimmed
        key: &'a str,
        /// Text after the first `=`, still escape-encoded and untrimmed
        raw_value: &'a str,
    },
    /// Non-blank line without a usable `=` (missing, or first character)
    Malformed,
}

impl<'a> Line<'a> {
    /// Classify a raw line
    ///
    /// Header detection runs first, so `[de]` is a header even though it would
    /// otherwise count as malformed.
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();

        if let Some(name) = header_name(trimmed) {
            return Line::Header(name);
        }
        if trimmed.is_empty() {
            return Line::Blank;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            return Line::Comment;
        }

        match trimmed.find('=') {
            Some(eq) if eq > 0 => {
                let key = trimmed[..eq].trim();
                // The value comes from the untrimmed line: surrounding
                // whitespace is part of it.
                let raw_value = line.split_once('=').map(|(_, v)| v).unwrap_or_default();
                Line::Entry { key, raw_value }
            }
            _ => Line::Malformed,
        }
    }
}

fn header_name(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

/// Tracks which section the scan is currently in
///
/// Each pass over the file owns its own cursor.
#[derive(Debug, Default, Clone)]
pub struct SectionCursor<'a> {
    current: Option<&'a str>,
}

impl<'a> SectionCursor<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the section opened by a header line
    pub fn enter(&mut self, name: &'a str) {
        self.current = Some(name);
    }

    /// Whether the cursor is exactly inside `section`
    pub fn is_in(&self, section: &str) -> bool {
        self.current == Some(section)
    }
}

/// Split file contents into lines
///
/// Both `\n` and `\r\n` terminate a line. A final terminator does not produce a
/// trailing empty line.
pub fn split_lines(contents: &str) -> Vec<&str> {
    contents.lines().collect()
}

/// Join lines back into file contents with a single trailing newline
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    out.push('\n');
    out
}
