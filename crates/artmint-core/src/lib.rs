//! Artmint Core - Foundational types for the artmint marketplace
//!
//! This crate provides the types every other artmint crate depends on:
//! - `TokenId` - Globally unique token identifiers (UUID v4)
//! - `ContentHash` - SHA-256 content addressing, the deduplication key
//! - Error types and Result alias

mod error;
mod hash;
mod token;

pub use error::{ArtmintError, Result};
pub use hash::ContentHash;
pub use token::TokenId;
