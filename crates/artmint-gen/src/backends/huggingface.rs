//! Hugging Face Inference API backend
//!
//! Issues one POST per generation attempt and returns the raw image
//! bytes. Retry policy lives in the resolver, not here; this backend
//! only classifies failures.

use std::io::Read;
use std::time::Duration;

use artmint_core::{ArtmintError, Result};
use tracing::debug;

use crate::backend::{BackendError, GenerationBackend};
use crate::config::GenConfig;

const DEFAULT_API_URL: &str = "https://api-inference.huggingface.co/models";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Backend for AI image generation via the Hugging Face Inference API
pub struct HuggingFaceBackend {
    api_key: String,
    api_url: String,
}

impl HuggingFaceBackend {
    /// Create a new HuggingFaceBackend from config
    pub fn from_config(config: &GenConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| {
                ArtmintError::ConfigError(
                    "Hugging Face API key not configured. Set ARTMINT_HF_API_KEY or add to .artmint/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config.api_url().unwrap_or(DEFAULT_API_URL).to_string();

        Ok(Self { api_key, api_url })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), model)
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

fn classify_error(e: ureq::Error) -> BackendError {
    match e {
        // 503 = model loading on the inference API
        ureq::Error::StatusCode(503) => BackendError::Warming,
        // 404/403 = private/gated/unknown model, never worth a retry
        ureq::Error::StatusCode(code @ (403 | 404)) => BackendError::Unavailable(code),
        other => BackendError::Failed(other.to_string()),
    }
}

impl GenerationBackend for HuggingFaceBackend {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn generate(&self, prompt: &str, model: &str) -> std::result::Result<Vec<u8>, BackendError> {
        let payload = serde_json::json!({
            "inputs": prompt,
            "options": { "wait_for_model": true }
        });

        debug!(model, "submitting generation request");

        let agent = build_agent();
        let response = agent
            .post(&self.endpoint(model))
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(classify_error)?;

        let mut reader = response.into_body().into_reader();
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| BackendError::Failed(format!("Failed to read image data: {}", e)))?;

        if bytes.is_empty() {
            return Err(BackendError::Failed("Empty response body".to_string()));
        }

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_warming() {
        assert_eq!(
            classify_error(ureq::Error::StatusCode(503)),
            BackendError::Warming
        );
    }

    #[test]
    fn test_classify_unavailable() {
        assert_eq!(
            classify_error(ureq::Error::StatusCode(404)),
            BackendError::Unavailable(404)
        );
        assert_eq!(
            classify_error(ureq::Error::StatusCode(403)),
            BackendError::Unavailable(403)
        );
    }

    #[test]
    fn test_classify_other_status_is_failed() {
        match classify_error(ureq::Error::StatusCode(500)) {
            BackendError::Failed(_) => {}
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let backend = HuggingFaceBackend {
            api_key: "k".to_string(),
            api_url: "https://example.com/models/".to_string(),
        };
        assert_eq!(
            backend.endpoint("org/model"),
            "https://example.com/models/org/model"
        );
    }
}
