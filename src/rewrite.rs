//! Second pass: rewrite stale English entries
//!
//! An English value that is byte-equal (after decoding) to its German
//! counterpart is taken to be an untranslated copy and is replaced by a
//! machine translation of the German text. Every other line is emitted
//! unchanged, so the output always has exactly as many lines as the input.

use tracing::debug;

use crate::codec::{decode, encode};
use crate::document::{Line, SOURCE_SECTION, SectionCursor, TARGET_SECTION};
use crate::index::SectionMap;
use crate::mt::error::{MtError, MtResult};
use crate::mt::shield::{protect, restore};
use crate::mt::translator::MachineTranslator;

/// Result of one rewrite pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Output lines, one per input line
    pub lines: Vec<String>,
    /// Entries replaced with a translation
    pub changed: usize,
    /// English entries whose value differs from the German one
    pub skipped: usize,
    /// Stale entries left alone because the pass was a dry run
    pub pending: usize,
}

/// Rewrite the English section of `lines`
///
/// # Arguments
/// * `lines` - Raw file lines
/// * `german` - German values by key, from [`crate::index::build_german_map`]
/// * `translator` - Provider for stale entries; may be `None` for a dry run
/// * `dry_run` - Report stale entries without translating them
///
/// # Errors
/// A provider failure aborts the pass. Asking for a real run without a
/// translator is a configuration error, raised only once a stale entry is
/// actually found.
pub async fn rewrite<S: AsRef<str>>(
    lines: &[S],
    german: &SectionMap,
    translator: Option<&dyn MachineTranslator>,
    dry_run: bool,
) -> MtResult<RewriteOutcome> {
    let mut cursor = SectionCursor::new();
    let mut outcome = RewriteOutcome {
        lines: Vec::with_capacity(lines.len()),
        ..RewriteOutcome::default()
    };

    for line in lines {
        let line = line.as_ref();

        let (key, raw_value) = match Line::classify(line) {
            Line::Header(name) => {
                cursor.enter(name);
                outcome.lines.push(line.to_string());
                continue;
            }
            Line::Entry { key, raw_value } if cursor.is_in(TARGET_SECTION) => (key, raw_value),
            _ => {
                outcome.lines.push(line.to_string());
                continue;
            }
        };

        let Some(german_value) = german.get(key) else {
            outcome.lines.push(line.to_string());
            continue;
        };

        if decode(raw_value) != german_value {
            debug!(key, "English value differs from German, keeping it");
            outcome.skipped += 1;
            outcome.lines.push(line.to_string());
            continue;
        }

        if dry_run {
            outcome.pending += 1;
            outcome.lines.push(line.to_string());
            continue;
        }

        let translator = translator.ok_or_else(|| {
            MtError::ConfigError("no translation provider configured".to_string())
        })?;
        let translated = translate_value(german_value, translator).await?;
        debug!(key, provider = translator.provider_name(), "translated entry");

        outcome.lines.push(format!("{}={}", key, encode(&translated)));
        outcome.changed += 1;
    }

    Ok(outcome)
}

/// Translate one decoded German value
///
/// Leading and trailing whitespace is kept as-is and only the core in between
/// is masked, translated and restored. An empty core is not sent to the
/// provider.
pub async fn translate_value(
    value: &str,
    translator: &dyn MachineTranslator,
) -> MtResult<String> {
    let (lead, core, trail) = split_whitespace_edges(value);
    if core.is_empty() {
        return Ok(value.to_string());
    }

    let (masked, table) = protect(core);
    debug!(tokens = table.len(), "masked value for translation");
    let translated = translator
        .translate(&masked, SOURCE_SECTION, TARGET_SECTION)
        .await?;
    let restored = restore(&translated, &table);

    Ok(format!("{}{}{}", lead, restored, trail))
}

/// Split `value` into leading whitespace, core and trailing whitespace
///
/// An all-whitespace value is entirely leading whitespace.
pub fn split_whitespace_edges(value: &str) -> (&str, &str, &str) {
    let rest = value.trim_start();
    let lead = &value[..value.len() - rest.len()];
    let core = rest.trim_end();
    let trail = &rest[core.len()..];
    (lead, core, trail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::split_lines;
    use crate::index::build_german_map;
    use crate::mt::mock::{MockMode, MockTranslator};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    async fn run(contents: &str, mock: &MockTranslator, dry_run: bool) -> RewriteOutcome {
        let lines = split_lines(contents);
        let german = build_german_map(&lines);
        rewrite(&lines, &german, Some(mock), dry_run).await.unwrap()
    }

    // ========== Staleness Detection ==========

    #[tokio::test]
    async fn test_equal_values_are_translated() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let outcome = run("[de]\nfoo=Hallo\n[en]\nfoo=Hallo\n", &mock, false).await;
        assert_eq!(outcome.lines, vec!["[de]", "foo=Hallo", "[en]", "foo=Hallo_en"]);
        assert_eq!(outcome.changed, 1);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_differing_values_are_skipped() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let outcome = run("[de]\nfoo=Hallo\n[en]\nfoo=Hello\n", &mock, false).await;
        assert_eq!(outcome.lines, vec!["[de]", "foo=Hallo", "[en]", "foo=Hello"]);
        assert_eq!(outcome.changed, 0);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_german_counterpart_untouched() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let outcome = run("[de]\nother=Hallo\n[en]\nfoo=Hallo\n", &mock, false).await;
        assert_eq!(outcome.lines[3], "foo=Hallo");
        assert_eq!(outcome.changed, 0);
        assert_eq!(outcome.skipped, 0);
    }

    #[tokio::test]
    async fn test_english_section_before_german_section() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let outcome = run("[en]\nfoo=Hallo\n[de]\nfoo=Hallo\n", &mock, false).await;
        assert_eq!(outcome.lines, vec!["[en]", "foo=Hallo_en", "[de]", "foo=Hallo"]);
    }

    #[tokio::test]
    async fn test_comparison_uses_decoded_values() {
        let mock = MockTranslator::new(MockMode::Suffix);
        // `\q` decodes to itself on both sides, and `\\` to a single backslash
        let outcome = run("[de]\nk=a\\qb\\\\\n[en]\nk=a\\qb\\\\\n", &mock, false).await;
        assert_eq!(outcome.changed, 1);
        assert_eq!(outcome.lines[3], "k=a\\\\qb\\\\_en");
    }

    // ========== Pass-through ==========

    #[tokio::test]
    async fn test_non_english_lines_pass_through() {
        let contents = "# header comment\n[de]\nfoo = Hallo \n[fr]\nfoo=Hallo\n[en]\n; c=d\n\n  not an entry\n=x\n";
        let mock = MockTranslator::new(MockMode::Suffix);
        let outcome = run(contents, &mock, false).await;
        assert_eq!(outcome.lines, split_lines(contents));
        assert_eq!(outcome.changed, 0);
    }

    #[tokio::test]
    async fn test_line_count_preserved() {
        let contents = "[de]\na=1\nb=2\n[en]\na=1\nb=x\nc=3\n\n";
        let mock = MockTranslator::new(MockMode::Suffix);
        let outcome = run(contents, &mock, false).await;
        assert_eq!(outcome.lines.len(), split_lines(contents).len());
        assert_eq!(outcome.changed, 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[tokio::test]
    async fn test_rewritten_line_uses_trimmed_key() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let outcome = run("[de]\nfoo=Hallo\n[en]\n  foo  =Hallo\n", &mock, false).await;
        assert_eq!(outcome.lines[3], "foo=Hallo_en");
    }

    // ========== Dry Run ==========

    #[tokio::test]
    async fn test_dry_run_never_translates() {
        let contents = "[de]\nfoo=Hallo\nbar=Welt\n[en]\nfoo=Hallo\nbar=World\n";
        let mock = MockTranslator::new(MockMode::Suffix);
        let outcome = run(contents, &mock, true).await;
        assert_eq!(outcome.lines, split_lines(contents));
        assert_eq!(outcome.changed, 0);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.pending, 1);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_dry_run_without_translator() {
        let lines = split_lines("[de]\nfoo=Hallo\n[en]\nfoo=Hallo\n");
        let german = build_german_map(&lines);
        let outcome = rewrite(&lines, &german, None, true).await.unwrap();
        assert_eq!(outcome.pending, 1);
    }

    #[tokio::test]
    async fn test_missing_translator_is_config_error() {
        let lines = split_lines("[de]\nfoo=Hallo\n[en]\nfoo=Hallo\n");
        let german = build_german_map(&lines);
        let result = rewrite(&lines, &german, None, false).await;
        assert!(matches!(result, Err(MtError::ConfigError(_))));
    }

    // ========== Translation Details ==========

    #[tokio::test]
    async fn test_tokens_survive_reordering() {
        let mock = MockTranslator::new(MockMode::Reorder);
        let outcome = run(
            "[de]\nk=Hallo %1, siehe <b>hier</b>\n[en]\nk=Hallo %1, siehe <b>hier</b>\n",
            &mock,
            false,
        )
        .await;
        // Masked: "Hallo __PH0__, siehe __TAG1__hier__TAG2__"
        assert_eq!(outcome.lines[3], "k=<b>hier</b> siehe %1, Hallo");
    }

    #[tokio::test]
    async fn test_tokens_survive_mapped_translation() {
        let mut map = HashMap::new();
        map.insert(
            (
                "Hallo __PH0__, siehe __TAG1__hier__TAG2__".to_string(),
                "en".to_string(),
            ),
            "Hello __PH0__, see __TAG1__here__TAG2__".to_string(),
        );
        let mock = MockTranslator::new(MockMode::Mappings(map));
        let outcome = run(
            "[de]\nk=Hallo %1, siehe <b>hier</b>\n[en]\nk=Hallo %1, siehe <b>hier</b>\n",
            &mock,
            false,
        )
        .await;
        assert_eq!(outcome.lines[3], "k=Hello %1, see <b>here</b>");
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_preserved() {
        let mut map = HashMap::new();
        map.insert(
            ("Hallo Welt".to_string(), "en".to_string()),
            "Hello world".to_string(),
        );
        let mock = MockTranslator::new(MockMode::Mappings(map));
        let outcome = run("[de]\nk=  Hallo Welt  \n[en]\nk=  Hallo Welt  \n", &mock, false).await;
        assert_eq!(outcome.lines[3], "k=  Hello world  ");
    }

    #[tokio::test]
    async fn test_translated_value_is_encoded() {
        let mut map = HashMap::new();
        map.insert(
            ("Zeile 1\nZeile 2".to_string(), "en".to_string()),
            "Line 1\nLine 2\tend".to_string(),
        );
        let mock = MockTranslator::new(MockMode::Mappings(map));
        let outcome = run(
            "[de]\nk=Zeile 1\\nZeile 2\\n\n[en]\nk=Zeile 1\\nZeile 2\\n\n",
            &mock,
            false,
        )
        .await;
        assert_eq!(outcome.lines[3], "k=Line 1\\nLine 2\\tend\\n");
    }

    #[tokio::test]
    async fn test_empty_values_are_rewritten_without_provider_call() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let outcome = run("[de]\nk=\n[en]\n k =\n", &mock, false).await;
        assert_eq!(outcome.lines[3], "k=");
        assert_eq!(outcome.changed, 1);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_all_whitespace_value_is_kept_without_provider_call() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let outcome = run("[de]\nk=   \n[en]\nk=   \n", &mock, false).await;
        assert_eq!(outcome.lines[3], "k=   ");
        assert_eq!(outcome.changed, 1);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_aborts() {
        let lines = split_lines("[de]\nfoo=Hallo\n[en]\nfoo=Hallo\n");
        let german = build_german_map(&lines);
        let mock = MockTranslator::new(MockMode::Error("offline".to_string()));
        let result = rewrite(&lines, &german, Some(&mock), false).await;
        assert_eq!(
            result,
            Err(MtError::TranslationError("offline".to_string()))
        );
    }

    // ========== Whitespace Split ==========

    #[test]
    fn test_split_whitespace_edges() {
        assert_eq!(split_whitespace_edges("  Hallo Welt \t"), ("  ", "Hallo Welt", " \t"));
        assert_eq!(split_whitespace_edges("Hallo"), ("", "Hallo", ""));
        assert_eq!(split_whitespace_edges(""), ("", "", ""));
        assert_eq!(split_whitespace_edges("   "), ("   ", "", ""));
        assert_eq!(split_whitespace_edges("\nText\n"), ("\n", "Text", "\n"));
    }
}
