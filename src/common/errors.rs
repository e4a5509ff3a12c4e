//! Error types for the application

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our ScreenerError
pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Main error type for screener operations
#[derive(Error, Debug)]
pub enum ScreenerError {
    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Non-success status from the news service
    #[error("News service returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Candidate source could not be read
    #[error("Failed to load candidates from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// Report sink could not be written
    #[error("Failed to deliver report to {path}: {reason}")]
    Deliver { path: PathBuf, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout errors
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for ScreenerError {
    fn from(err: config::ConfigError) -> Self {
        ScreenerError::Configuration(err.to_string())
    }
}

impl From<url::ParseError> for ScreenerError {
    fn from(err: url::ParseError) -> Self {
        ScreenerError::Configuration(format!("invalid URL: {}", err))
    }
}
