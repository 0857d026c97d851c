//! Argos translation package index
//!
//! LibreTranslate runs Argos Translate models. When a language pair is not
//! installed on the server and installation is permitted, the model package
//! is looked up in the public Argos package index, downloaded, and unpacked
//! into the local package directory the way Argos installs packages. The
//! server loads the unpacked package directory on its next start.

use crate::mt::error::{MtError, MtResult};
use serde::Deserialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Public Argos package index
pub const DEFAULT_INDEX_URL: &str =
    "https://raw.githubusercontent.com/argosopentech/argospm-index/main/index.json";

/// File every installed Argos package directory carries
const METADATA_FILE: &str = "metadata.json";

/// One translation package listed in the index
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PackageEntry {
    pub from_code: String,
    pub to_code: String,
    #[serde(default)]
    pub package_version: String,
    #[serde(default)]
    pub links: Vec<String>,
}

/// Parsed package index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageIndex {
    packages: Vec<PackageEntry>,
}

impl PackageIndex {
    pub fn from_json(json: &str) -> MtResult<Self> {
        let packages: Vec<PackageEntry> = serde_json::from_str(json)
            .map_err(|e| MtError::Other(format!("Failed to parse package index: {}", e)))?;
        Ok(Self { packages })
    }

    /// Download and parse the index at `url`
    pub async fn fetch(client: &reqwest::Client, url: &str) -> MtResult<Self> {
        let body = client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let index = Self::from_json(&body)?;
        if index.is_empty() {
            warn!(url, "package index lists no packages");
        }
        Ok(index)
    }

    /// Find the package translating `from` into `to`
    pub fn find(&self, from: &str, to: &str) -> Option<&PackageEntry> {
        self.packages
            .iter()
            .find(|p| p.from_code == from && p.to_code == to)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Download `package` and unpack it into `dir`
///
/// # Returns
/// The unpacked package directory (the one holding `metadata.json`)
pub async fn install(
    client: &reqwest::Client,
    package: &PackageEntry,
    dir: &Path,
) -> MtResult<PathBuf> {
    let link = package.links.first().ok_or_else(|| MtError::PackageUnavailable {
        from: package.from_code.clone(),
        to: package.to_code.clone(),
    })?;

    let bytes = client
        .get(link)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let package_dir = extract(&bytes, dir)?;
    info!(
        path = %package_dir.display(),
        bytes = bytes.len(),
        "installed translation package"
    );
    Ok(package_dir)
}

/// Unpack an `.argosmodel` archive into `dir`
///
/// The archive must contain a `metadata.json`; its parent inside the
/// archive becomes the package directory. Entries escaping `dir` are
/// rejected by the archive reader.
pub fn extract(archive: &[u8], dir: &Path) -> MtResult<PathBuf> {
    let invalid = |e: zip::result::ZipError| {
        MtError::Other(format!("Invalid package archive: {}", e))
    };

    let mut zip = zip::ZipArchive::new(Cursor::new(archive)).map_err(invalid)?;

    let metadata = zip
        .file_names()
        .map(Path::new)
        .filter(|name| name.file_name().is_some_and(|f| f == METADATA_FILE))
        .min_by_key(|name| name.components().count())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            MtError::Other(format!("Invalid package archive: no {}", METADATA_FILE))
        })?;

    std::fs::create_dir_all(dir).map_err(|e| {
        MtError::Other(format!(
            "Failed to create package directory '{}': {}",
            dir.display(),
            e
        ))
    })?;
    zip.extract(dir).map_err(invalid)?;

    let package_dir = match metadata.parent() {
        Some(parent) => dir.join(parent),
        None => dir.to_path_buf(),
    };
    Ok(package_dir)
}

/// Package directory used by Argos Translate when none is configured
pub fn default_package_dir() -> MtResult<PathBuf> {
    let home = std::env::var_os("HOME").ok_or_else(|| {
        MtError::ConfigError("HOME is not set; pass a package directory explicitly".to_string())
    })?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("argos-translate")
        .join("packages"))
}

/// Build an in-memory `.argosmodel` archive with the given entries
#[cfg(test)]
pub(crate) fn test_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    use std::io::Write;

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
