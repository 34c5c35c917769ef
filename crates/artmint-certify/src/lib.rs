//! Artmint Certify - Certificate and metadata generation
//!
//! Pure functions from an asset's identity fields to its digital
//! certificate and its ERC-721-shaped metadata document. No I/O, no
//! randomness: everything random or time-dependent (token id, creation
//! instant) is fixed upstream at mint time and threaded in, so both
//! documents can be re-derived for independent verification.

mod certificate;
mod metadata;

pub use certificate::{
    derive_certificate_hash, generate_certificate, Certificate, CertificateInputs,
    CertificateSummary, CERTIFICATE_VERSION, NETWORK_OFF_CHAIN, TOKEN_STANDARD,
};
pub use metadata::{generate_metadata, Attribute, MetadataInputs, MetadataProperties, TokenMetadata};
