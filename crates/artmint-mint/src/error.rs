//! Mint error taxonomy
//!
//! Three recognizable kinds, so the boundary layer can pick response
//! semantics: caller error, content conflict, and everything else
//! collapsed into one opaque internal kind that leaks no storage
//! detail. Upstream generation failure is deliberately absent: the
//! resolver degrades to a placeholder instead of failing the mint.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MintError {
    /// Required mint fields missing; never retried, surfaced verbatim
    #[error("Missing required fields: {0}")]
    Validation(String),

    /// This content hash was already minted, whether caught by the
    /// advisory check or by the store's uniqueness constraint
    #[error("Image content already minted (hash {0})")]
    DuplicateContent(String),

    /// File write or transaction failure other than the uniqueness
    /// constraint; retry policy belongs to the caller
    #[error("Persistence failure: {0}")]
    Persistence(String),
}
