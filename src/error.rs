//! Error types for the site engine
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the site engine
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// Language code outside the supported set
    #[snafu(display("Language {code} not supported"))]
    UnsupportedLanguage { code: String },

    /// Translation catalog keys differ between locales
    #[snafu(display("Translation catalog mismatch: {locale} is missing {}", missing.join(", ")))]
    CatalogParity {
        locale: String,
        missing: Vec<String>,
    },

    /// IO error (file operations, storage, etc.)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// HTTP request error
    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },

    /// Non-success HTTP status
    #[snafu(display("HTTP error! status: {status}"))]
    HttpStatus { status: u16 },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Http { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
