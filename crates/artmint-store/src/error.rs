//! Store error types

use thiserror::Error;

/// Errors produced by the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// The UNIQUE constraint on `assets.image_hash` fired: this content
    /// was already minted, possibly by a concurrent request that won
    /// the race after our advisory check passed.
    #[error("Image content already minted: {0}")]
    DuplicateImageHash(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ffi_err, Some(msg)) = &e {
            if ffi_err.code == rusqlite::ErrorCode::ConstraintViolation
                && msg.contains("image_hash")
            {
                return StoreError::DuplicateImageHash(msg.clone());
            }
        }
        StoreError::Internal(e.to_string())
    }
}
