use std::path::Path;

use anyhow::{bail, Result};
use artmint_store::{AssetFilter, AssetRecord, MarketDb};
use serde_json::json;

pub fn run(
    db_path: &str,
    creator: Option<String>,
    owner: Option<String>,
    status: Option<String>,
    limit: u32,
    offset: u32,
    format: &str,
) -> Result<()> {
    let db = MarketDb::open(Path::new(db_path))?;
    let assets = db.list_assets(&AssetFilter {
        creator_id: creator,
        owner_id: owner,
        status,
        limit: Some(limit),
        offset,
    })?;

    match format {
        "text" => print_text(&assets),
        "json" => print_json(&assets)?,
        other => bail!("unknown format '{}' (expected text or json)", other),
    }

    Ok(())
}

fn print_text(assets: &[AssetRecord]) {
    if assets.is_empty() {
        println!("No assets found");
        return;
    }
    for asset in assets {
        println!(
            "{}  {}  [{}]  creator={}  {}",
            asset.token_id,
            asset.name,
            asset.status,
            asset.creator_id.as_deref().unwrap_or("anonymous"),
            asset.created_at.to_rfc3339(),
        );
    }
}

fn print_json(assets: &[AssetRecord]) -> Result<()> {
    let rows: Vec<_> = assets
        .iter()
        .map(|asset| {
            json!({
                "token_id": asset.token_id.to_string(),
                "name": asset.name,
                "description": asset.description,
                "style": asset.style,
                "image_hash": asset.image_hash,
                "certificate_hash": asset.certificate_hash,
                "image_url": asset.image_url,
                "creator_id": asset.creator_id,
                "current_owner_id": asset.current_owner_id,
                "collection_id": asset.collection_id,
                "network": asset.network,
                "status": asset.status,
                "is_verified": asset.is_verified,
                "created_at": asset.created_at.to_rfc3339(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
