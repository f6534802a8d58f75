//! Error types for quickverse
//!
//! Provides standardized error handling across the crate.

use thiserror::Error;

use crate::provider::{FetchError, ProviderError};

/// Errors that can occur in quickverse
#[derive(Debug, Error)]
pub enum QuickVerseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider wiring errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Remote source construction errors
    #[error("Source error: {0}")]
    Source(#[from] FetchError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("Config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// State file errors
    #[error("State file error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for quickverse operations
pub type QuickVerseResult<T> = Result<T, QuickVerseError>;
