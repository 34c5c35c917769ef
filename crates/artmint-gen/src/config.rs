//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `ARTMINT_HF_API_KEY`, `ARTMINT_HF_API_URL`
//! 2. Project-local: `.artmint/config.toml`
//! 3. Global: `~/.artmint/config.toml`
//!
//! The resolved value is passed into the resolver by value at
//! construction time; no component reads ambient process state.

use std::path::{Path, PathBuf};

use artmint_core::{ArtmintError, Result};
use serde::{Deserialize, Serialize};

use crate::style::{Style, StyleBook};

/// Backend connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenConfigFile {
    #[serde(default)]
    pub backend: BackendConfig,
    /// Optional style overrides; when present they replace the built-in
    /// style book wholesale (candidate lists are curated as a unit)
    #[serde(default)]
    pub styles: Vec<Style>,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct GenConfig {
    pub backend: BackendConfig,
    pub styles: Vec<Style>,
}

impl GenConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = GenConfigFile::default();

        // Layer 1: Global config (~/.artmint/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        // Layer 2: Project-local config (.artmint/config.toml)
        let local_path = PathBuf::from(".artmint/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        // Layer 3: Environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(GenConfig {
            backend: config.backend,
            styles: config.styles,
        })
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(GenConfig {
            backend: config.backend,
            styles: config.styles,
        })
    }

    /// Get the backend API key
    pub fn api_key(&self) -> Option<&str> {
        self.backend.api_key.as_deref()
    }

    /// Get the backend API URL override
    pub fn api_url(&self) -> Option<&str> {
        self.backend.api_url.as_deref()
    }

    /// Build the style book: configured styles, or the built-ins
    pub fn style_book(&self) -> StyleBook {
        StyleBook::from_styles(self.styles.clone())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".artmint").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<GenConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: GenConfigFile = toml::from_str(&content).map_err(|e| {
            ArtmintError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut GenConfigFile, overlay: GenConfigFile) {
        if overlay.backend.api_key.is_some() {
            base.backend.api_key = overlay.backend.api_key;
        }
        if overlay.backend.api_url.is_some() {
            base.backend.api_url = overlay.backend.api_url;
        }
        if !overlay.styles.is_empty() {
            base.styles = overlay.styles;
        }
    }

    fn apply_env_overrides(config: &mut GenConfigFile) {
        if let Ok(key) = std::env::var("ARTMINT_HF_API_KEY") {
            config.backend.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("ARTMINT_HF_API_URL") {
            config.backend.api_url = Some(url);
        }
    }
}
