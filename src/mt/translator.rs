//! Machine Translation trait and utilities
//!
//! The merge rewriter only ever sees a `MachineTranslator`: plain text in,
//! plain text out. Which backend sits behind it (LibreTranslate, Google
//! Translate, the mock) is decided once by the provider factory.
//!
//! # Example
//!
//! ```ignore
//! use astrotext_sync::mt::{MachineTranslator, MockMode, MockTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = MockTranslator::new(MockMode::Suffix);
//!     let result = provider.translate("Hallo", "de", "en").await?;
//!     println!("{}", result); // "Hallo_en"
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use async_trait::async_trait;

/// Generic trait for machine translation providers
///
/// Implementations must leave substrings they do not recognize as natural
/// language alone. Callers mask placeholders and markup before translating
/// (see [`crate::mt::shield`]), so synthetic keys like `__PH0__` should come
/// back verbatim.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code (e.g., "de")
    /// * `target_locale` - Target language code (e.g., "en")
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(MtError)` - If translation fails
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Name used in logs to identify which provider handled a translation
    fn provider_name(&self) -> &str;
}

/// Normalize a locale code by stripping region information
///
/// - `de-DE` → `de`
/// - `EN` → `en`
pub fn normalize_locale(locale: &str) -> String {
    locale.split('-').next().unwrap_or(locale).to_lowercase()
}

/// Validate that a locale code is in acceptable format
///
/// Accepts ASCII alphanumerics, hyphens and underscores.
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}
