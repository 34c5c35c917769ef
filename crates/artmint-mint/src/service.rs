//! The mint service

use std::sync::Arc;

use artmint_certify::{
    generate_certificate, generate_metadata, Attribute, Certificate, CertificateInputs,
    MetadataInputs, TokenMetadata,
};
use artmint_core::{ContentHash, TokenId};
use artmint_gen::{ImageResolver, DEFAULT_STYLE};
use artmint_store::{AssetRecord, ImageStore, MarketDb, NewAsset, StoreError};
use chrono::Utc;
use tracing::{info, warn};

use crate::error::MintError;

/// Everything the boundary layer supplies for one mint call.
///
/// The boundary (an HTTP controller, here the CLI) has already handled
/// authentication, size limits, and transport decoding.
#[derive(Debug, Clone, Default)]
pub struct MintRequest {
    pub name: String,
    pub description: String,
    pub prompt: String,
    /// Empty string means the default style
    pub style: String,
    /// Pre-generated image bytes; when absent the resolver is driven
    pub image_bytes: Option<Vec<u8>>,
    pub creator_id: Option<String>,
    pub collection_id: Option<String>,
    /// Appended after the mandatory metadata attributes, in order
    pub attributes: Vec<Attribute>,
}

/// A successful mint: the persisted asset plus its derived documents
#[derive(Debug, Clone)]
pub struct MintReceipt {
    pub asset: AssetRecord,
    pub certificate: Certificate,
    pub metadata: TokenMetadata,
    /// Per-candidate failure summary when the image is a placeholder;
    /// the caller's only signal to maybe retry with a real image later
    pub generation: Option<String>,
}

/// Drives the mint pipeline against the store and the image resolver
pub struct MintService {
    db: Arc<MarketDb>,
    images: ImageStore,
    resolver: ImageResolver,
}

impl MintService {
    pub fn new(db: Arc<MarketDb>, images: ImageStore, resolver: ImageResolver) -> Self {
        Self {
            db,
            images,
            resolver,
        }
    }

    /// The store this service mints into
    pub fn db(&self) -> &Arc<MarketDb> {
        &self.db
    }

    /// The resolver, for the preview path
    pub fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }

    /// Mint one asset. Steps run strictly in order; see crate docs.
    pub fn mint(&self, request: &MintRequest) -> Result<MintReceipt, MintError> {
        // 1. Validate required fields
        validate(request)?;

        let style = if request.style.is_empty() {
            DEFAULT_STYLE
        } else {
            &request.style
        };

        // 2. Obtain image bytes: caller-supplied, else resolved.
        // The resolver absorbs upstream failures down to a placeholder,
        // so this step cannot fail on outage, only degrade.
        let (bytes, generation) = match &request.image_bytes {
            Some(supplied) => (supplied.clone(), None),
            None => {
                let resolved = self
                    .resolver
                    .resolve(&request.prompt, style)
                    .map_err(|e| MintError::Persistence(e.to_string()))?;
                if let Some(summary) = &resolved.degraded {
                    warn!(%summary, "minting with placeholder image");
                }
                (resolved.bytes, resolved.degraded)
            }
        };

        // 3. Content hash + advisory uniqueness gate
        let image_hash = ContentHash::from_bytes(&bytes);
        if self
            .db
            .image_hash_exists(&image_hash)
            .map_err(|e| MintError::Persistence(e.to_string()))?
        {
            return Err(MintError::DuplicateContent(image_hash.to_hex()));
        }

        // 4. Token identity and the fixed mint instant
        let token_id = TokenId::generate();
        let created_at = Utc::now();

        // 5. Persist bytes under the token id (outside the row
        // transaction; an orphaned file on a lost race is harmless)
        let saved = self
            .images
            .save(token_id, &bytes)
            .map_err(|e| MintError::Persistence(e.to_string()))?;

        // Derive the certificate and metadata from the now-fixed
        // identity fields
        let creator = request.creator_id.as_deref().filter(|c| !c.trim().is_empty());
        let certificate = generate_certificate(&CertificateInputs {
            token_id,
            image_hash: &image_hash,
            name: &request.name,
            description: &request.description,
            creator,
            created_at,
        });
        let metadata = generate_metadata(&MetadataInputs {
            token_id,
            name: &request.name,
            description: &request.description,
            image_url: &saved.url,
            image_hash: &image_hash,
            creator,
            attributes: &request.attributes,
        });
        let metadata_json = serde_json::to_string(&metadata)
            .map_err(|e| MintError::Persistence(format!("metadata serialization: {}", e)))?;

        // 6-7. Atomic insert; a lost duplicate race surfaces exactly
        // like the advisory miss
        let asset = self
            .db
            .insert_minted(&NewAsset {
                token_id,
                name: &request.name,
                description: &request.description,
                prompt: &request.prompt,
                style,
                image_hash: &image_hash,
                certificate_hash: &certificate.certificate_hash,
                image_url: &saved.url,
                metadata_json: &metadata_json,
                creator_id: creator,
                collection_id: request.collection_id.as_deref(),
                created_at,
            })
            .map_err(|e| match e {
                StoreError::DuplicateImageHash(_) => {
                    MintError::DuplicateContent(image_hash.to_hex())
                }
                other => MintError::Persistence(other.to_string()),
            })?;

        info!(token_id = %token_id, hash = %image_hash, "asset minted");

        // 8. The receipt
        Ok(MintReceipt {
            asset,
            certificate,
            metadata,
            generation,
        })
    }
}

fn validate(request: &MintRequest) -> Result<(), MintError> {
    let mut missing = Vec::new();
    if request.name.trim().is_empty() {
        missing.push("name");
    }
    if request.description.trim().is_empty() {
        missing.push("description");
    }
    if request.prompt.trim().is_empty() {
        missing.push("prompt");
    }
    if matches!(&request.image_bytes, Some(bytes) if bytes.is_empty()) {
        missing.push("image");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MintError::Validation(missing.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let err = validate(&MintRequest::default()).unwrap_err();
        match err {
            MintError::Validation(fields) => {
                assert_eq!(fields, "name, description, prompt");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_empty_supplied_bytes() {
        let request = MintRequest {
            name: "n".to_string(),
            description: "d".to_string(),
            prompt: "p".to_string(),
            image_bytes: Some(Vec::new()),
            ..Default::default()
        };
        let err = validate(&request).unwrap_err();
        assert!(matches!(err, MintError::Validation(f) if f == "image"));
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        let request = MintRequest {
            name: "n".to_string(),
            description: "d".to_string(),
            prompt: "p".to_string(),
            image_bytes: Some(vec![1]),
            ..Default::default()
        };
        assert!(validate(&request).is_ok());
    }
}
