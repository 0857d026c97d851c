//! Translation provider factory
//!
//! Turns configuration into a ready-to-use [`MachineTranslator`]. All
//! bootstrap failures (missing key, unreachable server, language pair not
//! installed) surface here as [`MtError`] values, before any file is
//! rewritten. Dry runs never call into this module.

use crate::mt::error::MtResult;
use crate::mt::google_translate::GoogleTranslateProvider;
use crate::mt::libretranslate::{self, InstallOptions, LibreTranslateProvider};
use crate::mt::mock::{MockMode, MockTranslator};
use crate::mt::packages;
use crate::mt::translator::MachineTranslator;
use std::path::PathBuf;
use tracing::{debug, info};

/// Available translation backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProviderKind {
    /// Self-hosted LibreTranslate server (Argos models)
    #[default]
    #[value(name = "libretranslate")]
    LibreTranslate,
    /// Google Translate API v2
    Google,
    /// Offline mock that appends the target locale
    Mock,
}

/// Everything needed to build a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub source_locale: String,
    pub target_locale: String,
    /// Permit downloading missing language models
    pub allow_install: bool,
    pub libretranslate_url: String,
    pub libretranslate_api_key: Option<String>,
    /// Falls back to `GOOGLE_TRANSLATE_API_KEY` when unset
    pub google_api_key: Option<String>,
    pub package_index_url: String,
    /// Falls back to the Argos default under `$HOME` when unset
    pub package_dir: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            source_locale: crate::document::SOURCE_SECTION.to_string(),
            target_locale: crate::document::TARGET_SECTION.to_string(),
            allow_install: false,
            libretranslate_url: libretranslate::DEFAULT_URL.to_string(),
            libretranslate_api_key: None,
            google_api_key: None,
            package_index_url: packages::DEFAULT_INDEX_URL.to_string(),
            package_dir: None,
        }
    }
}

impl ProviderConfig {
    fn install_options(&self) -> MtResult<Option<InstallOptions>> {
        if !self.allow_install {
            return Ok(None);
        }
        let package_dir = match &self.package_dir {
            Some(dir) => dir.clone(),
            None => packages::default_package_dir()?,
        };
        Ok(Some(InstallOptions {
            index_url: self.package_index_url.clone(),
            package_dir,
        }))
    }
}

/// Build the configured provider, verifying it can serve the language pair
pub async fn build_translator(config: &ProviderConfig) -> MtResult<Box<dyn MachineTranslator>> {
    let translator: Box<dyn MachineTranslator> = match config.kind {
        ProviderKind::LibreTranslate => {
            let provider = LibreTranslateProvider::new(
                &config.libretranslate_url,
                config.libretranslate_api_key.clone(),
            )?;
            let install = config.install_options()?;
            provider
                .ensure_language_pair(
                    &config.source_locale,
                    &config.target_locale,
                    install.as_ref(),
                )
                .await?;
            Box::new(provider)
        }
        ProviderKind::Google => {
            if config.allow_install {
                debug!("Google Translate serves all language pairs; nothing to install");
            }
            let provider = match &config.google_api_key {
                Some(key) => GoogleTranslateProvider::new(key.clone())?,
                None => GoogleTranslateProvider::from_env()?,
            };
            Box::new(provider)
        }
        ProviderKind::Mock => Box::new(MockTranslator::new(MockMode::Suffix)),
    };

    info!(
        provider = translator.provider_name(),
        from = %config.source_locale,
        to = %config.target_locale,
        "translation provider ready"
    );
    Ok(translator)
}
