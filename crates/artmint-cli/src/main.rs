//! Artmint CLI - Command-line boundary for the minting pipeline
//!
//! Stands in for the HTTP controller layer: decodes caller input,
//! drives the mint/curation services, and translates their typed
//! results into output and exit codes. It performs no authorization;
//! `featured` assumes an already-trusted curator.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{featured, list, mint, preview, show, styles};

#[derive(Parser)]
#[command(name = "artmint")]
#[command(about = "AI-art tokenization and minting pipeline", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the marketplace database file
    #[arg(long, global = true, default_value = "artmint.db")]
    db: String,

    /// Directory where minted image files are persisted
    #[arg(long, global = true, default_value = "uploads")]
    uploads: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a new asset from a prompt or a pre-generated image
    Mint {
        /// Display name for the asset
        name: String,

        /// Asset description
        #[arg(short, long)]
        description: String,

        /// Generation prompt
        #[arg(short, long)]
        prompt: String,

        /// Generation style (stable-diffusion, anime, realistic)
        #[arg(long, default_value = "stable-diffusion")]
        style: String,

        /// Path to a pre-generated image; skips the generation backend
        #[arg(long)]
        image: Option<String>,

        /// Creator identity recorded in provenance
        #[arg(long)]
        creator: Option<String>,

        /// Target collection id
        #[arg(long)]
        collection: Option<String>,

        /// Extra metadata attribute, key=value (repeatable)
        #[arg(long = "attribute")]
        attributes: Vec<String>,

        /// Generation backend (huggingface, mock)
        #[arg(long, default_value = "huggingface")]
        backend: String,
    },

    /// Generate a preview image without minting
    Preview {
        /// Generation prompt
        prompt: String,

        /// Generation style
        #[arg(long, default_value = "stable-diffusion")]
        style: String,

        /// Output image path
        #[arg(short, long, default_value = "preview.png")]
        output: String,

        /// Generation backend (huggingface, mock)
        #[arg(long, default_value = "huggingface")]
        backend: String,
    },

    /// Curate the featured-collections carousel
    #[command(subcommand)]
    Featured(featured::FeaturedCommands),

    /// List minted assets
    List {
        /// Filter by creator identity
        #[arg(long)]
        creator: Option<String>,

        /// Filter by current owner
        #[arg(long)]
        owner: Option<String>,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        /// Page size
        #[arg(long, default_value = "50")]
        limit: u32,

        /// Page offset
        #[arg(long, default_value = "0")]
        offset: u32,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show one asset with its provenance and metadata
    Show {
        /// The asset's token id
        token_id: String,
    },

    /// List available generation styles
    Styles,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mint {
            name,
            description,
            prompt,
            style,
            image,
            creator,
            collection,
            attributes,
            backend,
        } => mint::run(
            &cli.db,
            &cli.uploads,
            mint::MintArgs {
                name,
                description,
                prompt,
                style,
                image,
                creator,
                collection,
                attributes,
                backend,
            },
        ),
        Commands::Preview {
            prompt,
            style,
            output,
            backend,
        } => preview::run(&prompt, &style, &output, &backend),
        Commands::Featured(cmd) => featured::run(&cli.db, cmd),
        Commands::List {
            creator,
            owner,
            status,
            limit,
            offset,
            format,
        } => list::run(&cli.db, creator, owner, status, limit, offset, &format),
        Commands::Show { token_id } => show::run(&cli.db, &token_id),
        Commands::Styles => styles::run(),
    }
}
