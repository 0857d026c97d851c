use thiserror::Error;

/// Error types for the Machine Translation module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// Provider configuration is missing or invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Transport-level failure talking to a provider
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Locale code rejected before reaching a provider
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    /// The provider cannot translate between the requested languages
    #[error("Translation languages not installed for {from}->{to}")]
    LanguagesNotInstalled { from: String, to: String },
    /// The package index has nothing for the requested languages
    #[error("No translation package available for {from}->{to}")]
    PackageUnavailable { from: String, to: String },
    /// A package was installed but the server has not loaded it yet
    #[error("Installed translation package for {from}->{to} at '{path}'; restart the translation server to load it")]
    RestartRequired {
        from: String,
        to: String,
        path: String,
    },
    /// Error during translation phase
    #[error("Translation error: {0}")]
    TranslationError(String),
    /// General error with context
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        MtError::NetworkError(err.to_string())
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
