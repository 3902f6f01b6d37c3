//! Error types for the Pest Bot gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Pest Bot gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credential is fatal at startup)
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid client input, rejected before retrieval or generation
    #[error("validation error: {0}")]
    Validation(String),

    /// External generation call failure
    #[error("generation error: {0}")]
    Generation(String),

    /// Speech-to-text failure
    #[error("transcription error: {0}")]
    Transcription(String),

    /// Image decoding or re-encoding failure
    #[error("image error: {0}")]
    Image(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
