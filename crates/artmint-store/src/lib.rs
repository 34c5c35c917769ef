//! Artmint Store - Relational persistence for the marketplace
//!
//! SQLite-backed storage for assets, their append-only provenance
//! transfers, and curated collections, plus the filesystem image store.
//!
//! The store is the single source of truth shared across requests. The
//! one load-bearing schema decision: `assets.image_hash` carries a
//! UNIQUE constraint, which is the authoritative guarantee behind the
//! application-level uniqueness check. A constraint violation on that
//! column is surfaced as `StoreError::DuplicateImageHash` so callers
//! can treat the advisory-check miss and the lost race identically.

pub mod assets;
pub mod collections;
mod db;
mod error;
pub mod files;
pub mod schema;

pub use assets::{AssetFilter, AssetRecord, NewAsset, TransferRecord, TRANSFER_TYPE_MINT};
pub use collections::{CollectionRecord, FEATURED_CAPACITY};
pub use db::MarketDb;
pub use error::StoreError;
pub use files::{ImageStore, SavedImage};
