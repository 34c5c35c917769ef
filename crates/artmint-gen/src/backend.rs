//! Generation backend trait and failure classification

use std::fmt;

/// How a single generation call against one model candidate failed.
///
/// The resolver treats the backend as untrusted and unreliable; these
/// variants drive its candidate state machine and are never surfaced
/// past the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The model is loading ("warming up"); worth exactly one retry
    /// against the same candidate.
    Warming,
    /// The model is not served at all (not found / forbidden / gated);
    /// skip to the next candidate without retry.
    Unavailable(u16),
    /// Any other failure: timeout, transport error, malformed response.
    Failed(String),
}

impl BackendError {
    /// The HTTP status behind this failure, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Warming => Some(503),
            BackendError::Unavailable(code) => Some(*code),
            BackendError::Failed(_) => None,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Warming => write!(f, "model warming up (503)"),
            BackendError::Unavailable(code) => write!(f, "model unavailable ({})", code),
            BackendError::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

/// Trait implemented by each generation backend (Hugging Face, mock)
pub trait GenerationBackend: Send + Sync {
    /// Backend name (e.g. "huggingface", "mock")
    fn name(&self) -> &str;

    /// Run one generation request against one model candidate.
    ///
    /// Returns the raw image bytes on success. Blocks up to the
    /// backend's per-call timeout.
    fn generate(&self, prompt: &str, model: &str) -> Result<Vec<u8>, BackendError>;
}

// Lets tests keep a handle to a backend they hand to the resolver
impl<B: GenerationBackend + ?Sized> GenerationBackend for std::sync::Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate(&self, prompt: &str, model: &str) -> Result<Vec<u8>, BackendError> {
        (**self).generate(prompt, model)
    }
}
