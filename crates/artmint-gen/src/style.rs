//! Style registry: per-style model candidates and prompt enhancement
//!
//! Each style carries an ordered list of model candidates (most-preferred
//! first) and a prompt suffix. Unknown styles fall back to the default
//! style's list, so the resolver never sees an empty candidate set.

use serde::{Deserialize, Serialize};

/// The style used when the caller supplies none or an unknown one
pub const DEFAULT_STYLE: &str = "stable-diffusion";

/// One generation style: candidate models plus prompt enrichment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub id: String,
    /// Model candidates in priority order; the first that responds wins
    pub candidates: Vec<String>,
    /// Appended to the caller's prompt before generation
    pub prompt_suffix: String,
}

/// The full set of styles known to the resolver
#[derive(Debug, Clone)]
pub struct StyleBook {
    styles: Vec<Style>,
}

impl StyleBook {
    /// The built-in styles.
    ///
    /// Candidates are models broadly served by the inference API; some
    /// realistic models are private/gated and answer 404/403, which is
    /// why that list is deeper.
    pub fn builtin() -> Self {
        Self {
            styles: vec![
                Style {
                    id: "stable-diffusion".to_string(),
                    candidates: vec![
                        "stabilityai/stable-diffusion-2-1".to_string(),
                        "runwayml/stable-diffusion-v1-5".to_string(),
                    ],
                    prompt_suffix: "high quality, detailed, 4k, digital art".to_string(),
                },
                Style {
                    id: "anime".to_string(),
                    candidates: vec![
                        "Linaqruf/animagine-xl-3.1".to_string(),
                        "hakurei/waifu-diffusion".to_string(),
                    ],
                    prompt_suffix: "anime style, highly detailed, vibrant colors, masterpiece"
                        .to_string(),
                },
                Style {
                    id: "realistic".to_string(),
                    candidates: vec![
                        "SG161222/Realistic_Vision_V5.1_noVAE".to_string(),
                        "stabilityai/sd-turbo".to_string(),
                        "stabilityai/stable-diffusion-2-1".to_string(),
                    ],
                    prompt_suffix:
                        "photorealistic, highly detailed, professional photography, 8k".to_string(),
                },
            ],
        }
    }

    /// Build from an explicit style list (for tests and config overrides).
    /// An empty list falls back to the built-ins so lookups always resolve.
    pub fn from_styles(styles: Vec<Style>) -> Self {
        if styles.is_empty() {
            Self::builtin()
        } else {
            Self { styles }
        }
    }

    /// Look up a style, falling back to the default for unknown ids
    pub fn get(&self, id: &str) -> &Style {
        self.styles
            .iter()
            .find(|s| s.id == id)
            .or_else(|| self.styles.iter().find(|s| s.id == DEFAULT_STYLE))
            .unwrap_or(&self.styles[0])
    }

    /// Candidate models for a style, in priority order
    pub fn candidates_for(&self, id: &str) -> &[String] {
        &self.get(id).candidates
    }

    /// Enrich a caller prompt with the style's suffix
    pub fn enhance_prompt(&self, prompt: &str, id: &str) -> String {
        let style = self.get(id);
        if style.prompt_suffix.is_empty() {
            prompt.to_string()
        } else {
            format!("{}, {}", prompt, style.prompt_suffix)
        }
    }

    /// All styles, for listing
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }
}

impl Default for StyleBook {
    fn default() -> Self {
        Self::builtin()
    }
}
