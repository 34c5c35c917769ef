//! Featured-collection curation commands
//!
//! Admin surface: callers are assumed to be already authorized.

use std::path::Path;

use anyhow::Result;
use artmint_store::{MarketDb, FEATURED_CAPACITY};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum FeaturedCommands {
    /// Replace the featured set with the given collection ids, in rank
    /// order (truncated to the carousel capacity)
    Set {
        /// Collection ids, most prominent first
        ids: Vec<String>,
    },

    /// Show the current featured set
    List,

    /// Clear every featured slot
    Clear,

    /// Create a collection so it can be featured
    Create {
        /// Collection id
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },
}

pub fn run(db_path: &str, cmd: FeaturedCommands) -> Result<()> {
    let db = MarketDb::open(Path::new(db_path))?;

    match cmd {
        FeaturedCommands::Set { ids } => {
            if ids.len() > FEATURED_CAPACITY {
                eprintln!(
                    "note: {} ids supplied, keeping the first {}",
                    ids.len(),
                    FEATURED_CAPACITY
                );
            }
            let applied = db.set_featured(&ids)?;
            println!("Featured ({}): {}", applied.len(), applied.join(", "));
        }
        FeaturedCommands::List => {
            let featured = db.featured()?;
            if featured.is_empty() {
                println!("No featured collections");
            }
            for collection in featured {
                println!(
                    "  {}. {} ({})",
                    collection.featured_order.unwrap_or_default(),
                    collection.name,
                    collection.collection_id
                );
            }
        }
        FeaturedCommands::Clear => {
            db.set_featured(&[])?;
            println!("Cleared all featured collections");
        }
        FeaturedCommands::Create {
            id,
            name,
            description,
        } => {
            db.insert_collection(&id, &name, description.as_deref())?;
            println!("Created collection {}", id);
        }
    }

    Ok(())
}
