use std::path::Path;

use anyhow::{bail, Result};
use artmint_core::TokenId;
use artmint_store::MarketDb;

pub fn run(db_path: &str, token_id: &str) -> Result<()> {
    let token_id: TokenId = token_id.parse()?;
    let db = MarketDb::open(Path::new(db_path))?;

    let Some(asset) = db.get_by_token(token_id)? else {
        bail!("no asset with token id {}", token_id);
    };

    println!("Token:       {}", asset.token_id);
    println!("Name:        {}", asset.name);
    println!("Description: {}", asset.description);
    println!("Style:       {}", asset.style);
    println!("Prompt:      {}", asset.prompt);
    println!("Image:       {} ({})", asset.image_url, asset.image_hash);
    println!("Certificate: {}", asset.certificate_hash);
    println!(
        "Creator:     {}",
        asset.creator_id.as_deref().unwrap_or("anonymous")
    );
    println!(
        "Owner:       {}",
        asset.current_owner_id.as_deref().unwrap_or("-")
    );
    if let Some(collection) = &asset.collection_id {
        println!("Collection:  {}", collection);
    }
    println!("Network:     {}", asset.network);
    println!("Status:      {}", asset.status);
    println!("Verified:    {}", asset.is_verified);
    println!("Created:     {}", asset.created_at.to_rfc3339());

    let transfers = db.transfers_for(asset.asset_id)?;
    if !transfers.is_empty() {
        println!("\nProvenance:");
        for transfer in transfers {
            println!(
                "  {}  {}  -> {}",
                transfer.transferred_at.to_rfc3339(),
                transfer.transfer_type,
                transfer.to_user_id
            );
        }
    }

    let metadata: serde_json::Value = serde_json::from_str(&asset.metadata_json)?;
    println!("\nMetadata:\n{}", serde_json::to_string_pretty(&metadata)?);

    Ok(())
}
