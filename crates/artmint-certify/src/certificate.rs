//! Digital certificates for minted assets
//!
//! The certificate hash is a pure function of (token id, image hash,
//! name, description, creator, creation instant): the same six inputs
//! always serialize to the same canonical JSON and therefore the same
//! SHA-256, which is what makes later independent verification possible.

use artmint_core::{ContentHash, TokenId};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Certificate format version
pub const CERTIFICATE_VERSION: &str = "1.0";
/// Network marker; always off-chain in this system
pub const NETWORK_OFF_CHAIN: &str = "off-chain";
/// Token standard the metadata document follows
pub const TOKEN_STANDARD: &str = "ERC-721";

/// Identity fields a certificate is derived from
#[derive(Debug, Clone)]
pub struct CertificateInputs<'a> {
    pub token_id: TokenId,
    pub image_hash: &'a ContentHash,
    pub name: &'a str,
    pub description: &'a str,
    pub creator: Option<&'a str>,
    /// Fixed once at mint time; never recomputed from "now"
    pub created_at: DateTime<Utc>,
}

// Canonical serialization for hashing. Field order is part of the
// format: serde_json emits struct fields in declaration order.
#[derive(Serialize)]
struct CertificateSeal<'a> {
    token_id: String,
    image_hash: String,
    name: &'a str,
    description: &'a str,
    creator: Option<&'a str>,
    created_at: String,
}

/// Human-readable summary embedded in the certificate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateSummary {
    pub name: String,
    pub description: String,
    pub creator: Option<String>,
    pub standard: String,
}

/// A re-verifiable proof-of-identity document for one asset.
///
/// Not persisted as its own row: embedded into the asset's metadata and
/// returned in the mint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub token_id: TokenId,
    pub image_hash: String,
    pub certificate_hash: String,
    pub timestamp: String,
    pub version: String,
    /// Reserved for a future on-chain contract; always None here
    pub contract_address: Option<String>,
    pub network: String,
    pub verified: bool,
    pub metadata: CertificateSummary,
}

fn canonical_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Derive the certificate hash for a set of identity fields.
///
/// Deterministic: calling this twice with identical inputs yields the
/// identical hex string.
pub fn derive_certificate_hash(inputs: &CertificateInputs<'_>) -> String {
    let seal = CertificateSeal {
        token_id: inputs.token_id.to_string(),
        image_hash: inputs.image_hash.to_hex(),
        name: inputs.name,
        description: inputs.description,
        creator: inputs.creator,
        created_at: canonical_timestamp(inputs.created_at),
    };

    // A struct with only string fields cannot fail to serialize
    let canonical = serde_json::to_string(&seal).unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Build the full certificate for a set of identity fields
pub fn generate_certificate(inputs: &CertificateInputs<'_>) -> Certificate {
    Certificate {
        token_id: inputs.token_id,
        image_hash: inputs.image_hash.to_hex(),
        certificate_hash: derive_certificate_hash(inputs),
        timestamp: canonical_timestamp(inputs.created_at),
        version: CERTIFICATE_VERSION.to_string(),
        contract_address: None,
        network: NETWORK_OFF_CHAIN.to_string(),
        verified: true,
        metadata: CertificateSummary {
            name: inputs.name.to_string(),
            description: inputs.description.to_string(),
            creator: inputs.creator.map(str::to_string),
            standard: TOKEN_STANDARD.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_inputs<'a>(hash: &'a ContentHash) -> CertificateInputs<'a> {
        CertificateInputs {
            token_id: "c56a4180-65aa-42ec-a945-5fd21dec0538".parse().unwrap(),
            image_hash: hash,
            name: "Aurora",
            description: "northern lights over a fjord",
            creator: Some("user-1"),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_certificate_hash_is_idempotent() {
        let hash = ContentHash::from_bytes(b"pixels");
        let inputs = fixed_inputs(&hash);
        assert_eq!(
            derive_certificate_hash(&inputs),
            derive_certificate_hash(&inputs)
        );
    }

    #[test]
    fn test_certificate_hash_changes_with_any_input() {
        let hash = ContentHash::from_bytes(b"pixels");
        let base = derive_certificate_hash(&fixed_inputs(&hash));

        let mut renamed = fixed_inputs(&hash);
        renamed.name = "Borealis";
        assert_ne!(base, derive_certificate_hash(&renamed));

        let other_hash = ContentHash::from_bytes(b"other pixels");
        let mut rehashed = fixed_inputs(&hash);
        rehashed.image_hash = &other_hash;
        assert_ne!(base, derive_certificate_hash(&rehashed));

        let mut anonymous = fixed_inputs(&hash);
        anonymous.creator = None;
        assert_ne!(base, derive_certificate_hash(&anonymous));
    }

    #[test]
    fn test_certificate_fields() {
        let hash = ContentHash::from_bytes(b"pixels");
        let inputs = fixed_inputs(&hash);
        let cert = generate_certificate(&inputs);

        assert_eq!(cert.version, "1.0");
        assert_eq!(cert.network, "off-chain");
        assert!(cert.verified);
        assert!(cert.contract_address.is_none());
        assert_eq!(cert.image_hash, hash.to_hex());
        assert_eq!(cert.certificate_hash.len(), 64);
        assert_eq!(cert.metadata.standard, "ERC-721");
        assert_eq!(cert.timestamp, "2025-06-01T12:00:00.000Z");
    }

    #[test]
    fn test_certificate_hash_matches_standalone_derivation() {
        let hash = ContentHash::from_bytes(b"pixels");
        let inputs = fixed_inputs(&hash);
        let cert = generate_certificate(&inputs);
        assert_eq!(cert.certificate_hash, derive_certificate_hash(&inputs));
    }
}
