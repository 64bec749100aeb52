//! Error types for the film agent.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the film agent.
///
/// Only failures that abort the current search or update end up here.
/// Per-candidate rejections are modeled as [`crate::core::matcher::Rejection`]
/// so one bad search result never aborts the whole pagination loop.
#[derive(Error, Debug)]
pub enum Error {
    // Filename errors
    #[error("Filename does not match the configured pattern: {0}")]
    PatternMismatch(String),

    #[error("Year is mandatory but missing from filename: {0}")]
    MissingYear(String),

    #[error("Invalid filename pattern: {0}")]
    InvalidPattern(String),

    // Search errors
    #[error("Unknown site: {0}")]
    UnknownSite(String),

    #[error("No match found for '{0}'")]
    NoMatchFound(String),

    #[error("Fetch failed for {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    // Match-result artifact errors
    #[error("Invalid match result: {0}")]
    InvalidMatchResult(String),

    // Config errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
