/*!
 * Error types for the localesync application.
 *
 * This module contains custom error types for the different stages of a
 * locale sync run, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The provider answered but produced no text
    #[error("Provider returned an empty response")]
    EmptyResponse,
}

/// Errors that can occur while translating a tree
#[derive(Error, Debug)]
pub enum TranslationError {
    /// No candidate in the provider output parsed as JSON.
    /// The raw text is kept for diagnosis.
    #[error("Malformed provider response ({reason}): {raw}")]
    MalformedProviderResponse {
        /// Full provider output
        raw: String,
        /// Parse error of the last candidate tried, or the shape mismatch
        reason: String,
    },

    /// Network or HTTP failure calling the provider
    #[error("Provider call failed: {0}")]
    ProviderCallFailed(#[from] ProviderError),
}

impl TranslationError {
    /// Raw provider text, when this error carries one
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::MalformedProviderResponse { raw, .. } => Some(raw),
            Self::ProviderCallFailed(_) => None,
        }
    }
}

/// Errors raised while syncing a single file for a single language
#[derive(Error, Debug)]
pub enum SyncError {
    /// The source-locale file for a namespace does not exist
    #[error("Source file not found: {0}")]
    MissingSourceFile(PathBuf),

    /// An existing target-locale file could not be read or parsed
    #[error("Target file unreadable: {path} ({reason})")]
    TargetFileUnreadable {
        /// Path of the target file
        path: PathBuf,
        /// Underlying I/O or parse error
        reason: String,
    },

    /// Translation of the diff failed
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the variant loader
#[derive(Error, Debug)]
pub enum LoaderError {
    /// `index.json` is absent from the variants directory
    #[error("Variant index file not found: {0}")]
    IndexNotFound(PathBuf),

    /// `index.json` exists but could not be read or parsed
    #[error("Failed to load variant index: {0}")]
    IndexUnreadable(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from a sync step
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Error from the variant loader
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
