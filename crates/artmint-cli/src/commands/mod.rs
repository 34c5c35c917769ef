//! CLI command implementations

pub mod featured;
pub mod list;
pub mod mint;
pub mod preview;
pub mod show;
pub mod styles;

use anyhow::Result;
use artmint_gen::{backends, GenConfig, ImageResolver};

/// Build a resolver over the named backend with layered config applied
pub fn build_resolver(backend_name: &str) -> Result<ImageResolver> {
    let config = GenConfig::load()?;
    let backend = backends::create_backend(backend_name, &config)?;
    Ok(ImageResolver::new(backend, config.style_book()))
}
