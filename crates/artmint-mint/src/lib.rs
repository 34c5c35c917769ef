//! Artmint Mint - The tokenization and minting pipeline
//!
//! Orchestrates the one sequence in the marketplace with real
//! invariants: caller bytes (or resolver output) -> content hash ->
//! advisory uniqueness gate -> token id -> file write -> atomic asset
//! plus provenance insert -> certified receipt. Steps run strictly in
//! order; the only cross-request shared state is the store.

mod error;
mod service;

pub use error::MintError;
pub use service::{MintReceipt, MintRequest, MintService};
