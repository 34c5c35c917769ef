//! Backend registry
//!
//! Maps backend names to concrete implementations.

pub mod huggingface;
pub mod mock;

use artmint_core::{ArtmintError, Result};

use crate::backend::GenerationBackend;
use crate::config::GenConfig;

/// Create a backend by name with configuration
pub fn create_backend(name: &str, config: &GenConfig) -> Result<Box<dyn GenerationBackend>> {
    match name {
        "mock" => Ok(Box::new(mock::MockBackend::succeeding())),
        "huggingface" => Ok(Box::new(huggingface::HuggingFaceBackend::from_config(
            config,
        )?)),
        _ => Err(ArtmintError::GenerationError(format!(
            "Unknown backend '{}'. Available: huggingface, mock",
            name
        ))),
    }
}

/// List all available backend names
pub fn available_backends() -> Vec<&'static str> {
    vec!["huggingface", "mock"]
}
