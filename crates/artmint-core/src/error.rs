//! Error types shared across artmint crates

use thiserror::Error;

/// The main error type for artmint operations
#[derive(Debug, Error)]
pub enum ArtmintError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid content hash: {0}")]
    InvalidHash(String),

    #[error("Invalid token id: {0}")]
    InvalidTokenId(String),
}

/// Result type alias for artmint operations
pub type Result<T> = std::result::Result<T, ArtmintError>;
