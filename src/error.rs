use thiserror::Error;

use crate::config::ConfigError;

/// Main application error type that encompasses all fatal failure modes.
///
/// Sitemap rule violations are never represented here; they are recorded on
/// the [`ValidationRun`](crate::run::ValidationRun) as plain messages.
#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout: {url} after {timeout_seconds} seconds")]
    Timeout { url: String, timeout_seconds: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ConfigError> for SitemapError {
    fn from(err: ConfigError) -> Self {
        SitemapError::Config(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SitemapError>;
