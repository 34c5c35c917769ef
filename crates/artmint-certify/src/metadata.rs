//! ERC-721-shaped metadata documents
//!
//! The attribute list leads with four mandatory entries (creator,
//! provenance marker, token id, image hash); caller-supplied attributes
//! are appended after them in the order given. Callers must not rely on
//! attribute positions for identity, only on the mandatory items being
//! present.

use artmint_core::{ContentHash, TokenId};
use serde::{Deserialize, Serialize};

const PLATFORM: &str = "Artmint";
const METADATA_VERSION: &str = "1.0";
/// The fixed provenance marker every minted asset carries
pub(crate) const PROVENANCE_MARKER: &str = "AI Generated";

/// One trait entry in the attribute list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attribute {
    pub trait_type: String,
    pub value: serde_json::Value,
}

impl Attribute {
    pub fn new(trait_type: &str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: value.into(),
        }
    }
}

/// Platform-specific properties block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataProperties {
    pub token_id: TokenId,
    pub image_hash: String,
    pub creator: Option<String>,
    pub platform: String,
    pub version: String,
}

/// The full metadata document stored with the asset and returned from mint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    /// Image locator; an IPFS URI once off-platform storage exists
    pub image: String,
    pub external_url: Option<String>,
    pub attributes: Vec<Attribute>,
    pub properties: MetadataProperties,
}

/// Identity fields a metadata document is derived from
#[derive(Debug, Clone)]
pub struct MetadataInputs<'a> {
    pub token_id: TokenId,
    pub name: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub image_hash: &'a ContentHash,
    pub creator: Option<&'a str>,
    pub attributes: &'a [Attribute],
}

/// Build the metadata document for a set of identity fields. Pure.
pub fn generate_metadata(inputs: &MetadataInputs<'_>) -> TokenMetadata {
    let creator_value = match inputs.creator {
        Some(c) => serde_json::Value::String(c.to_string()),
        None => serde_json::Value::Null,
    };

    let mut attributes = vec![
        Attribute::new("Creator", creator_value),
        Attribute::new("Generation Method", PROVENANCE_MARKER),
        Attribute::new("Token ID", inputs.token_id.to_string()),
        Attribute::new("Image Hash", inputs.image_hash.to_hex()),
    ];
    attributes.extend(inputs.attributes.iter().cloned());

    TokenMetadata {
        name: inputs.name.to_string(),
        description: inputs.description.to_string(),
        image: inputs.image_url.to_string(),
        external_url: None,
        attributes,
        properties: MetadataProperties {
            token_id: inputs.token_id,
            image_hash: inputs.image_hash.to_hex(),
            creator: inputs.creator.map(str::to_string),
            platform: PLATFORM.to_string(),
            version: METADATA_VERSION.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(hash: &'a ContentHash, extra: &'a [Attribute]) -> MetadataInputs<'a> {
        MetadataInputs {
            token_id: "c56a4180-65aa-42ec-a945-5fd21dec0538".parse().unwrap(),
            name: "Aurora",
            description: "northern lights over a fjord",
            image_url: "/uploads/c56a4180-65aa-42ec-a945-5fd21dec0538.png",
            image_hash: hash,
            creator: Some("user-1"),
            attributes: extra,
        }
    }

    #[test]
    fn test_mandatory_attributes_lead_in_order() {
        let hash = ContentHash::from_bytes(b"pixels");
        let extra = [Attribute::new("Mood", "calm")];
        let meta = generate_metadata(&inputs(&hash, &extra));

        let traits: Vec<&str> = meta
            .attributes
            .iter()
            .map(|a| a.trait_type.as_str())
            .collect();
        assert_eq!(
            traits,
            vec!["Creator", "Generation Method", "Token ID", "Image Hash", "Mood"]
        );
        assert_eq!(meta.attributes[1].value, "AI Generated");
        assert_eq!(meta.attributes[3].value, hash.to_hex().as_str());
    }

    #[test]
    fn test_missing_creator_serializes_as_null() {
        let hash = ContentHash::from_bytes(b"pixels");
        let mut anon = inputs(&hash, &[]);
        anon.creator = None;
        let meta = generate_metadata(&anon);

        assert_eq!(meta.attributes[0].value, serde_json::Value::Null);
        assert!(meta.properties.creator.is_none());
    }

    #[test]
    fn test_document_shape() {
        let hash = ContentHash::from_bytes(b"pixels");
        let meta = generate_metadata(&inputs(&hash, &[]));
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["name"], "Aurora");
        assert_eq!(json["external_url"], serde_json::Value::Null);
        assert_eq!(json["properties"]["platform"], "Artmint");
        assert_eq!(
            json["image"],
            "/uploads/c56a4180-65aa-42ec-a945-5fd21dec0538.png"
        );
    }

    #[test]
    fn test_metadata_is_deterministic() {
        let hash = ContentHash::from_bytes(b"pixels");
        let a = serde_json::to_string(&generate_metadata(&inputs(&hash, &[]))).unwrap();
        let b = serde_json::to_string(&generate_metadata(&inputs(&hash, &[]))).unwrap();
        assert_eq!(a, b);
    }
}
