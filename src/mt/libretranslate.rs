//! LibreTranslate provider for machine translation
//!
//! LibreTranslate is a self-hosted HTTP front-end for Argos Translate models.
//! Which language pairs it can serve depends on the models installed on the
//! server, so the provider checks `/languages` before any file is touched.
//!
//! # Example
//!
//! ```ignore
//! let provider = LibreTranslateProvider::new("http://localhost:5000", None)?;
//! provider.ensure_language_pair("de", "en", None).await?;
//! let text = provider.translate("Hallo Welt", "de", "en").await?;
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::packages::{self, PackageIndex};
use crate::mt::translator::{MachineTranslator, normalize_locale, validate_locale};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default address of a locally running LibreTranslate server
pub const DEFAULT_URL: &str = "http://localhost:5000";

/// A source language as reported by `/languages`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LanguageInfo {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Whether `languages` contains a model translating `from` into `to`
pub fn supports_pair(languages: &[LanguageInfo], from: &str, to: &str) -> bool {
    languages
        .iter()
        .any(|lang| lang.code == from && lang.targets.iter().any(|t| t == to))
}

/// Where to look for and put missing model packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    pub index_url: String,
    pub package_dir: PathBuf,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct LibreTranslateProvider {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl LibreTranslateProvider {
    /// Create a provider for the server at `base_url`
    ///
    /// An empty API key is treated as no key.
    pub fn new(base_url: &str, api_key: Option<String>) -> MtResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(MtError::ConfigError(
                "LibreTranslate URL cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Language pairs currently served
    pub async fn languages(&self) -> MtResult<Vec<LanguageInfo>> {
        let url = format!("{}/languages", self.base_url);
        let languages = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<LanguageInfo>>()
            .await?;
        Ok(languages)
    }

    /// Make sure the server can translate `from` into `to`
    ///
    /// With `install` set, a missing pair is fetched from the package index
    /// and unpacked into the package directory, then the server is asked
    /// again. A server that has not picked the package up yet yields
    /// [`MtError::RestartRequired`]. Without `install`, a missing pair fails
    /// right away.
    pub async fn ensure_language_pair(
        &self,
        from: &str,
        to: &str,
        install: Option<&InstallOptions>,
    ) -> MtResult<()> {
        if supports_pair(&self.languages().await?, from, to) {
            debug!(from, to, "language pair available");
            return Ok(());
        }

        let Some(install) = install else {
            return Err(MtError::LanguagesNotInstalled {
                from: from.to_string(),
                to: to.to_string(),
            });
        };

        let index = PackageIndex::fetch(&self.client, &install.index_url).await?;
        debug!(packages = index.len(), url = %install.index_url, "fetched package index");
        let package = index.find(from, to).ok_or_else(|| MtError::PackageUnavailable {
            from: from.to_string(),
            to: to.to_string(),
        })?;
        let path = packages::install(&self.client, package, &install.package_dir).await?;

        if supports_pair(&self.languages().await?, from, to) {
            info!(path = %path.display(), "server loaded installed package");
            Ok(())
        } else {
            Err(MtError::RestartRequired {
                from: from.to_string(),
                to: to.to_string(),
                path: path.display().to_string(),
            })
        }
    }

    fn parse_response(body: TranslateResponse) -> MtResult<String> {
        if let Some(error) = body.error {
            return Err(MtError::TranslationError(error));
        }
        body.translated_text.ok_or_else(|| {
            MtError::TranslationError(
                "Invalid API response: missing 'translatedText' field".to_string(),
            )
        })
    }
}

impl std::fmt::Debug for LibreTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibreTranslateProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for LibreTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }

        let mut body = json!({
            "q": text,
            "source": normalize_locale(source_locale),
            "target": normalize_locale(target_locale),
            "format": "text"
        });
        if let Some(key) = &self.api_key {
            body["api_key"] = json!(key);
        }

        let url = format!("{}/translate", self.base_url);
        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        let parsed: TranslateResponse = response.json().await.map_err(|e| {
            MtError::TranslationError(format!(
                "Failed to parse API response ({}): {}",
                status, e
            ))
        })?;

        if status.is_client_error() {
            return Err(MtError::ConfigError(format!(
                "API client error ({}): {}",
                status,
                parsed.error.unwrap_or_default()
            )));
        }

        Self::parse_response(parsed)
    }

    fn provider_name(&self) -> &str {
        "LibreTranslate"
    }
}
