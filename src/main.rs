use std::path::PathBuf;

use anyhow::Context;
use astrotext_sync::mt::{ProviderConfig, ProviderKind, libretranslate, packages};
use astrotext_sync::{SOURCE_SECTION, TARGET_SECTION, sync_file};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Translate English astrotext entries that are still copies of the German text
#[derive(Parser, Debug)]
#[command(name = "astrotext-sync", version, about)]
struct Cli {
    /// Path to the astrotext resource file
    astrotext_path: PathBuf,

    /// Permit downloading and unpacking missing translation models
    #[arg(long)]
    install: bool,

    /// Report only: do not translate or modify the file
    #[arg(long)]
    dry_run: bool,

    /// Translation backend
    #[arg(long, value_enum, env = "ASTROTEXT_PROVIDER", default_value_t = ProviderKind::LibreTranslate)]
    provider: ProviderKind,

    /// LibreTranslate server address
    #[arg(long, env = "LIBRETRANSLATE_URL", default_value = libretranslate::DEFAULT_URL)]
    libretranslate_url: String,

    /// LibreTranslate API key
    #[arg(long, env = "LIBRETRANSLATE_API_KEY", hide_env_values = true)]
    libretranslate_api_key: Option<String>,

    /// Google Translate API key
    #[arg(long, env = "GOOGLE_TRANSLATE_API_KEY", hide_env_values = true)]
    google_api_key: Option<String>,

    /// Argos package index used by --install
    #[arg(long, env = "ARGOS_PACKAGE_INDEX", default_value = packages::DEFAULT_INDEX_URL)]
    package_index: String,

    /// Directory receiving unpacked packages
    #[arg(long, env = "ARGOS_PACKAGES_DIR")]
    package_dir: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            kind: self.provider,
            source_locale: SOURCE_SECTION.to_string(),
            target_locale: TARGET_SECTION.to_string(),
            allow_install: self.install,
            libretranslate_url: self.libretranslate_url.clone(),
            libretranslate_api_key: self.libretranslate_api_key.clone(),
            google_api_key: self.google_api_key.clone(),
            package_index_url: self.package_index.clone(),
            package_dir: self.package_dir.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let report = sync_file(&cli.astrotext_path, &cli.provider_config(), cli.dry_run)
        .await
        .with_context(|| format!("failed to sync {}", cli.astrotext_path.display()))?;

    println!("{}", report);
    Ok(())
}
