//! Keep the English section of an astrotext resource file in sync with its
//! German source.
//!
//! An astrotext file holds bracket-sectioned `key=value` entries. An English
//! entry whose value is identical to the German entry under the same key is
//! taken to be an untranslated copy; it is replaced with a machine translation
//! of the German text. Every other line is written back byte-for-byte.
//!
//! ```ignore
//! use astrotext_sync::{sync_contents, mt::{MockMode, MockTranslator}};
//!
//! let mock = MockTranslator::new(MockMode::Suffix);
//! let (output, report) = sync_contents("[de]\nk=Hallo\n[en]\nk=Hallo\n", Some(&mock), false).await?;
//! assert_eq!(output, "[de]\nk=Hallo\n[en]\nk=Hallo_en\n");
//! assert_eq!(report.changed, 1);
//! ```

pub mod codec;
pub mod document;
pub mod error;
pub mod index;
pub mod mt;
pub mod rewrite;
pub mod sync;

pub use codec::{decode, encode};
pub use document::{Line, SOURCE_SECTION, TARGET_SECTION};
pub use error::{Error, Result};
pub use index::{SectionMap, build_german_map, build_section_map};
pub use rewrite::{RewriteOutcome, rewrite};
pub use sync::{SyncReport, sync_contents, sync_file, sync_file_with};
