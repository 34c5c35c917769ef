//! End-to-end pipeline tests: supplied bytes, resolver fallback,
//! duplicate rejection, and the concurrent-duplicate race.

use std::sync::{Arc, Barrier};
use std::time::Duration;

use artmint_certify::{derive_certificate_hash, CertificateInputs};
use artmint_core::ContentHash;
use artmint_gen::backends::mock::{MockBackend, MockOutcome};
use artmint_gen::{ImageResolver, Style, StyleBook};
use artmint_mint::{MintError, MintRequest, MintService};
use artmint_store::{AssetFilter, MarketDb};

struct Fixture {
    service: Arc<MintService>,
    db: Arc<MarketDb>,
    backend: Arc<MockBackend>,
    _uploads: tempfile::TempDir,
}

fn fixture() -> Fixture {
    let db = Arc::new(MarketDb::open_in_memory().unwrap());
    let uploads = tempfile::tempdir().unwrap();
    let images = artmint_store::ImageStore::new(uploads.path());

    let backend = Arc::new(MockBackend::succeeding());
    let styles = StyleBook::from_styles(vec![Style {
        id: "stable-diffusion".to_string(),
        candidates: vec!["m1".to_string(), "m2".to_string()],
        prompt_suffix: String::new(),
    }]);
    let resolver = ImageResolver::new(Box::new(backend.clone()), styles)
        .with_warm_retry_delay(Duration::from_millis(0));

    Fixture {
        service: Arc::new(MintService::new(db.clone(), images, resolver)),
        db,
        backend,
        _uploads: uploads,
    }
}

fn request_with_bytes(bytes: &[u8], creator: Option<&str>) -> MintRequest {
    MintRequest {
        name: "A".to_string(),
        description: "d".to_string(),
        prompt: "p".to_string(),
        image_bytes: Some(bytes.to_vec()),
        creator_id: creator.map(str::to_string),
        ..Default::default()
    }
}

fn asset_count(db: &MarketDb) -> usize {
    db.list_assets(&AssetFilter::default()).unwrap().len()
}

#[test]
fn mint_with_supplied_bytes_persists_certified_asset() {
    let fx = fixture();
    let receipt = fx
        .service
        .mint(&request_with_bytes(b"pixels-x", Some("U1")))
        .unwrap();

    let expected_hash = ContentHash::from_bytes(b"pixels-x");
    assert_eq!(receipt.asset.image_hash, expected_hash.to_hex());
    assert!(receipt.generation.is_none());

    // Exactly one mint provenance entry for the creator
    let transfers = fx.db.transfers_for(receipt.asset.asset_id).unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].transfer_type, "mint");
    assert_eq!(transfers[0].to_user_id, "U1");

    // The image file landed under the token id
    let stored = fx.db.get_by_token(receipt.asset.token_id).unwrap().unwrap();
    assert_eq!(
        stored.image_url,
        format!("/uploads/{}.png", receipt.asset.token_id)
    );

    // Metadata leads with the mandatory attributes
    let traits: Vec<&str> = receipt
        .metadata
        .attributes
        .iter()
        .map(|a| a.trait_type.as_str())
        .collect();
    assert_eq!(
        &traits[..4],
        &["Creator", "Generation Method", "Token ID", "Image Hash"]
    );
}

#[test]
fn certificate_hash_is_reverifiable_from_the_stored_row() {
    let fx = fixture();
    let receipt = fx
        .service
        .mint(&request_with_bytes(b"pixels-verify", Some("U1")))
        .unwrap();

    let asset = &receipt.asset;
    let hash = ContentHash::from_hex(&asset.image_hash).unwrap();
    let rederived = derive_certificate_hash(&CertificateInputs {
        token_id: asset.token_id,
        image_hash: &hash,
        name: &asset.name,
        description: &asset.description,
        creator: asset.creator_id.as_deref(),
        created_at: asset.created_at,
    });
    assert_eq!(rederived, asset.certificate_hash);
    assert_eq!(rederived, receipt.certificate.certificate_hash);
}

#[test]
fn second_mint_of_same_bytes_is_rejected_and_first_is_untouched() {
    let fx = fixture();
    let first = fx
        .service
        .mint(&request_with_bytes(b"pixels-dup", Some("U1")))
        .unwrap();

    let err = fx
        .service
        .mint(&request_with_bytes(b"pixels-dup", Some("U2")))
        .unwrap_err();
    assert!(matches!(err, MintError::DuplicateContent(_)));

    assert_eq!(asset_count(&fx.db), 1);
    let survivor = fx.db.get_by_token(first.asset.token_id).unwrap().unwrap();
    assert_eq!(survivor.creator_id.as_deref(), Some("U1"));
    assert_eq!(fx.db.transfers_for(survivor.asset_id).unwrap().len(), 1);
}

#[test]
fn concurrent_identical_mints_have_exactly_one_winner() {
    let fx = fixture();
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = ["U1", "U2"]
        .into_iter()
        .map(|creator| {
            let service = fx.service.clone();
            let barrier = barrier.clone();
            std::thread::spawn(move || {
                let request = request_with_bytes(b"pixels-race", Some(creator));
                barrier.wait();
                service.mint(&request)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(MintError::DuplicateContent(_))))
        .count();

    assert_eq!(winners, 1, "exactly one of the two mints must succeed");
    assert_eq!(duplicates, 1, "the loser must fail as a duplicate");
    assert_eq!(asset_count(&fx.db), 1);
}

#[test]
fn mint_without_creator_has_no_provenance() {
    let fx = fixture();
    let receipt = fx
        .service
        .mint(&request_with_bytes(b"pixels-anon", None))
        .unwrap();

    assert!(receipt.asset.creator_id.is_none());
    assert!(receipt.asset.current_owner_id.is_none());
    assert!(fx.db.transfers_for(receipt.asset.asset_id).unwrap().is_empty());
}

#[test]
fn blank_creator_is_treated_as_anonymous() {
    let fx = fixture();
    let receipt = fx
        .service
        .mint(&request_with_bytes(b"pixels-blank", Some("   ")))
        .unwrap();

    assert!(receipt.asset.creator_id.is_none());
    assert!(fx.db.transfers_for(receipt.asset.asset_id).unwrap().is_empty());
}

#[test]
fn mint_without_bytes_drives_the_resolver() {
    let fx = fixture();
    let request = MintRequest {
        name: "A".to_string(),
        description: "d".to_string(),
        prompt: "a fox in snow".to_string(),
        creator_id: Some("U1".to_string()),
        ..Default::default()
    };

    let receipt = fx.service.mint(&request).unwrap();
    assert!(receipt.generation.is_none());
    assert_eq!(fx.backend.calls(), vec!["m1"]);
    assert_eq!(asset_count(&fx.db), 1);
}

#[test]
fn total_outage_still_mints_a_placeholder_asset() {
    let fx = fixture();
    fx.backend.enqueue("m1", MockOutcome::Unavailable(404));
    fx.backend
        .enqueue("m2", MockOutcome::Failed("connection reset".to_string()));

    let request = MintRequest {
        name: "A".to_string(),
        description: "d".to_string(),
        prompt: "a fox in snow".to_string(),
        creator_id: Some("U1".to_string()),
        ..Default::default()
    };

    let receipt = fx.service.mint(&request).unwrap();
    let summary = receipt.generation.expect("failure summary must be present");
    assert!(!summary.is_empty());
    assert!(summary.contains("m1"));

    // The placeholder is a real decodable image with a stored hash
    let stored = fx.db.get_by_token(receipt.asset.token_id).unwrap().unwrap();
    assert_eq!(
        stored.image_hash,
        receipt.certificate.image_hash,
        "asset row and certificate must agree on the content hash"
    );
    let path = fx
        ._uploads
        .path()
        .join(format!("{}.png", receipt.asset.token_id));
    let bytes = std::fs::read(path).unwrap();
    assert!(image::load_from_memory(&bytes).is_ok());
    assert_eq!(ContentHash::from_bytes(&bytes).to_hex(), stored.image_hash);
}

#[test]
fn validation_failure_persists_nothing() {
    let fx = fixture();
    let err = fx.service.mint(&MintRequest::default()).unwrap_err();
    assert!(matches!(err, MintError::Validation(_)));
    assert_eq!(asset_count(&fx.db), 0);
}
