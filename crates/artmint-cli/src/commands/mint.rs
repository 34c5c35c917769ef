//! Mint command

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use artmint_certify::Attribute;
use artmint_mint::{MintRequest, MintService};
use artmint_store::{ImageStore, MarketDb};

pub struct MintArgs {
    pub name: String,
    pub description: String,
    pub prompt: String,
    pub style: String,
    pub image: Option<String>,
    pub creator: Option<String>,
    pub collection: Option<String>,
    pub attributes: Vec<String>,
    pub backend: String,
}

pub fn run(db_path: &str, uploads: &str, args: MintArgs) -> Result<()> {
    let db = Arc::new(MarketDb::open(Path::new(db_path))?);
    let images = ImageStore::new(uploads);
    let resolver = super::build_resolver(&args.backend)?;
    let service = MintService::new(db, images, resolver);

    let image_bytes = match &args.image {
        Some(path) => Some(
            std::fs::read(path).with_context(|| format!("failed to read image {}", path))?,
        ),
        None => None,
    };

    let attributes = args
        .attributes
        .iter()
        .map(|raw| parse_attribute(raw))
        .collect::<Result<Vec<_>>>()?;

    let receipt = service.mint(&MintRequest {
        name: args.name,
        description: args.description,
        prompt: args.prompt,
        style: args.style,
        image_bytes,
        creator_id: args.creator,
        collection_id: args.collection,
        attributes,
    })?;

    println!("Minted: {}", receipt.asset.name);
    println!("  token_id:         {}", receipt.asset.token_id);
    println!("  image_hash:       {}", receipt.asset.image_hash);
    println!("  certificate_hash: {}", receipt.asset.certificate_hash);
    println!("  image_url:        {}", receipt.asset.image_url);
    if let Some(creator) = &receipt.asset.creator_id {
        println!("  creator:          {}", creator);
    }
    println!(
        "  certificate:      {}",
        serde_json::to_string_pretty(&receipt.certificate)?
    );

    if let Some(summary) = &receipt.generation {
        eprintln!("warning: all model candidates failed, minted a placeholder image");
        eprintln!("  {}", summary);
    }

    Ok(())
}

fn parse_attribute(raw: &str) -> Result<Attribute> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("attribute '{}' is not key=value", raw))?;
    Ok(Attribute::new(key.trim(), value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute() {
        let attr = parse_attribute("Mood = calm").unwrap();
        assert_eq!(attr.trait_type, "Mood");
        assert_eq!(attr.value, "calm");
    }

    #[test]
    fn test_parse_attribute_rejects_bare_key() {
        assert!(parse_attribute("Mood").is_err());
    }
}
