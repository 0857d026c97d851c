//! First pass: index one section's entries by key
//!
//! The rewriter only needs the German values, looked up by key. Values are
//! stored decoded; nothing here protects tokens or translates.

use std::collections::HashMap;

use crate::codec::decode;
use crate::document::{Line, SOURCE_SECTION, SectionCursor};

/// Decoded values of one section, keyed by entry key
///
/// Duplicate keys are not an error: the last occurrence wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SectionMap(pub HashMap<String, String>);

impl SectionMap {
    pub fn new() -> Self {
        SectionMap(HashMap::new())
    }
    pub fn insert(&mut self, key: &str, value: String) -> &mut Self {
        self.0.insert(key.to_owned(), value);
        self
    }
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the key → decoded value map for entries inside `section`
pub fn build_section_map<S: AsRef<str>>(lines: &[S], section: &str) -> SectionMap {
    let mut cursor = SectionCursor::new();
    let mut map = SectionMap::new();

    for line in lines {
        match Line::classify(line.as_ref()) {
            Line::Header(name) => cursor.enter(name),
            Line::Entry { key, raw_value } if cursor.is_in(section) => {
                map.insert(key, decode(raw_value));
            }
            _ => {}
        }
    }

    map
}

/// Build the German map used by the rewriter
pub fn build_german_map<S: AsRef<str>>(lines: &[S]) -> SectionMap {
    build_section_map(lines, SOURCE_SECTION)
}
