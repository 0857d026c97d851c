//! One sync run over a resource file
//!
//! Reads the whole file, indexes the German section, rewrites the English
//! section in memory and writes the result back in a single operation. A dry
//! run reads and reports only: no provider is built and the file is left
//! untouched.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::document::{join_lines, split_lines};
use crate::error::{Error, Result};
use crate::index::build_german_map;
use crate::mt::error::MtResult;
use crate::mt::provider::{ProviderConfig, build_translator};
use crate::mt::translator::MachineTranslator;
use crate::rewrite::rewrite;

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub dry_run: bool,
    /// Keys in the German section
    pub german_keys: usize,
    /// English entries replaced with a translation
    pub changed: usize,
    /// English entries left alone because they differ from the German value
    pub skipped: usize,
    /// Stale English entries a real run would translate (dry run only)
    pub pending: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            writeln!(f, "dry-run")?;
            writeln!(f, "de keys: {}", self.german_keys)?;
            write!(f, "stale en entries: {}", self.pending)
        } else {
            writeln!(f, "translated: {}", self.changed)?;
            write!(f, "skipped (en!=de): {}", self.skipped)
        }
    }
}

/// Sync file contents in memory
///
/// Returns the new contents (always ending in a single newline) and the
/// report.
pub async fn sync_contents(
    contents: &str,
    translator: Option<&dyn MachineTranslator>,
    dry_run: bool,
) -> MtResult<(String, SyncReport)> {
    let lines = split_lines(contents);
    let german = build_german_map(&lines);
    if german.is_empty() {
        warn!("no German entries found; nothing can be translated");
    }
    let outcome = rewrite(&lines, &german, translator, dry_run).await?;

    let report = SyncReport {
        dry_run,
        german_keys: german.len(),
        changed: outcome.changed,
        skipped: outcome.skipped,
        pending: outcome.pending,
    };
    Ok((join_lines(&outcome.lines), report))
}

/// Sync the file at `path` with an already built translator
pub async fn sync_file_with(
    path: &Path,
    translator: Option<&dyn MachineTranslator>,
    dry_run: bool,
) -> Result<SyncReport> {
    let contents = read(path)?;
    write_back(path, &contents, translator, dry_run).await
}

/// Sync the file at `path`, building the provider from `config`
///
/// The file is read before the provider is built, so a missing file fails
/// without contacting any server. Provider failures happen before anything is
/// written.
pub async fn sync_file(path: &Path, config: &ProviderConfig, dry_run: bool) -> Result<SyncReport> {
    let contents = read(path)?;
    let translator = if dry_run {
        None
    } else {
        Some(build_translator(config).await?)
    };
    write_back(path, &contents, translator.as_deref(), dry_run).await
}

async fn write_back(
    path: &Path,
    contents: &str,
    translator: Option<&dyn MachineTranslator>,
    dry_run: bool,
) -> Result<SyncReport> {
    let (output, report) = sync_contents(contents, translator, dry_run).await?;

    if !dry_run {
        std::fs::write(path, output).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), changed = report.changed, "wrote resource file");
    }

    Ok(report)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
