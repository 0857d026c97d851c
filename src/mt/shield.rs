//! Token shield for protecting machine tokens during machine translation
//!
//! Numeric placeholders (`%1`, `%12`) and markup tags (`<b>`, `</a>`) must
//! survive translation untouched. Before a value is sent to a provider, each
//! of them is swapped for a synthetic key the provider treats as an opaque
//! word; after translation the keys are swapped back.
//!
//! Format: `__PH{n}__` for placeholders, `__TAG{n}__` for tags, where `n` is a
//! single counter shared by both kinds and starting at 0 for every call.
//!
//! Placeholders are masked across the whole text first, then tags are masked
//! in the already-masked text. The two passes are not interleaved by
//! position, so in `<i>%1</i>` the placeholder gets `n = 0` and the tags
//! `n = 1, 2`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[1-9]\d*").expect("placeholder pattern is valid"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// Synthetic keys and the substrings they stand for, in masking order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    entries: Vec<(String, String)>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `original` and return the key that replaces it
    fn store(&mut self, prefix: &str, original: &str) -> String {
        let key = format!("__{}{}__", prefix, self.entries.len());
        self.entries.push((key.clone(), original.to_string()));
        key
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Mask placeholders and tags in `text`
///
/// # Returns
/// The masked text and the table needed by [`restore`]
///
/// # Example
/// ```ignore
/// let (masked, table) = protect("Hallo %1, siehe <b>hier</b>");
/// assert_eq!(masked, "Hallo __PH0__, siehe __TAG1__hier__TAG2__");
/// assert_eq!(restore(&masked, &table), "Hallo %1, siehe <b>hier</b>");
/// ```
pub fn protect(text: &str) -> (String, TokenTable) {
    let mut table = TokenTable::new();

    let masked = PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| table.store("PH", &caps[0]))
        .into_owned();
    let masked = TAG_RE
        .replace_all(&masked, |caps: &Captures| table.store("TAG", &caps[0]))
        .into_owned();

    (masked, table)
}

/// Put the original substrings back in place of their keys
///
/// Keys are replaced in reverse masking order. A placeholder inside a tag
/// (`<a href="%1">`) is masked before the tag, so its key lives inside the
/// tag's original text and only appears once the tag is restored.
///
/// Best effort: a key the translator dropped is simply not restored, and a
/// key it duplicated is restored at every occurrence. No error is raised.
pub fn restore(text: &str, table: &TokenTable) -> String {
    if table.is_empty() {
        return text.to_string();
    }
    let mut result = text.to_string();
    for (key, original) in table.entries.iter().rev() {
        result = result.replace(key.as_str(), original);
    }
    result
}
