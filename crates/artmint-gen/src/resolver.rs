//! The image acquisition resolver
//!
//! Walks a style's model candidates in priority order and returns the
//! first success. Each candidate runs a small state machine: Pending,
//! then at most Retrying (once, only on a warming signal), then
//! Succeeded or Failed. When every candidate is exhausted the resolver
//! does not fail the caller: it substitutes a deterministic placeholder
//! and reports the per-candidate failures in a summary field, which is
//! the only way callers can tell a placeholder result apart.

use std::fmt;
use std::time::Duration;

use artmint_core::Result;
use tracing::{info, warn};

use crate::backend::{BackendError, GenerationBackend};
use crate::placeholder;
use crate::style::StyleBook;

const WARM_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Why one model candidate was given up on
#[derive(Debug, Clone)]
pub struct CandidateFailure {
    pub model: String,
    pub status: Option<u16>,
    pub message: String,
}

impl CandidateFailure {
    fn from_backend(model: &str, err: BackendError) -> Self {
        Self {
            model: model.to_string(),
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "{} -> {}: {}", self.model, code, self.message),
            None => write!(f, "{} -> ERR: {}", self.model, self.message),
        }
    }
}

/// The outcome of a resolve call. Always carries valid image bytes;
/// `degraded` is `Some` (and non-empty) iff the bytes are a placeholder.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub bytes: Vec<u8>,
    /// The model that produced the bytes; `None` for a placeholder
    pub model: Option<String>,
    /// The enhanced prompt actually sent to the backend
    pub prompt_used: String,
    /// Failure summary when a placeholder was substituted
    pub degraded: Option<String>,
    /// Every candidate failure recorded along the walk
    pub failures: Vec<CandidateFailure>,
}

impl ResolvedImage {
    /// Whether the bytes came from the local placeholder path
    pub fn is_placeholder(&self) -> bool {
        self.degraded.is_some()
    }
}

// Per-candidate state; Retrying is entered at most once
enum CandidateState {
    Pending,
    Retrying,
}

enum Attempt {
    Succeeded(Vec<u8>),
    Failed(CandidateFailure),
}

/// Resolves prompts to image bytes through an ordered candidate walk
pub struct ImageResolver {
    backend: Box<dyn GenerationBackend>,
    styles: StyleBook,
    warm_retry_delay: Duration,
}

impl ImageResolver {
    /// Create a resolver over a backend and a style book
    pub fn new(backend: Box<dyn GenerationBackend>, styles: StyleBook) -> Self {
        Self {
            backend,
            styles,
            warm_retry_delay: WARM_RETRY_DELAY,
        }
    }

    /// Override the warming retry delay (tests use zero)
    pub fn with_warm_retry_delay(mut self, delay: Duration) -> Self {
        self.warm_retry_delay = delay;
        self
    }

    /// The style book this resolver was built with
    pub fn styles(&self) -> &StyleBook {
        &self.styles
    }

    /// Produce image bytes for a prompt and style.
    ///
    /// Never fails on upstream errors; the only error path is local
    /// placeholder encoding. Candidates are tried strictly in order,
    /// never in parallel.
    pub fn resolve(&self, prompt: &str, style: &str) -> Result<ResolvedImage> {
        let enhanced = self.styles.enhance_prompt(prompt, style);
        let candidates = self.styles.candidates_for(style).to_vec();
        let mut failures = Vec::new();

        for model in &candidates {
            info!(model, backend = self.backend.name(), "trying candidate");
            match self.try_candidate(&enhanced, model) {
                Attempt::Succeeded(bytes) => {
                    return Ok(ResolvedImage {
                        bytes,
                        model: Some(model.clone()),
                        prompt_used: enhanced,
                        degraded: None,
                        failures,
                    });
                }
                Attempt::Failed(failure) => {
                    warn!(model, status = ?failure.status, "candidate failed");
                    failures.push(failure);
                }
            }
        }

        let summary = failures
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(" | ");
        warn!("all candidates exhausted, substituting local placeholder");

        let bytes = placeholder::synthesize(&enhanced, style, &summary)?;
        Ok(ResolvedImage {
            bytes,
            model: None,
            prompt_used: enhanced,
            degraded: Some(summary),
            failures,
        })
    }

    fn try_candidate(&self, prompt: &str, model: &str) -> Attempt {
        let mut state = CandidateState::Pending;
        loop {
            match self.backend.generate(prompt, model) {
                Ok(bytes) => return Attempt::Succeeded(bytes),
                Err(BackendError::Warming) if matches!(state, CandidateState::Pending) => {
                    // One immediate retry of the same candidate
                    info!(model, "model warming up, retrying once");
                    state = CandidateState::Retrying;
                    std::thread::sleep(self.warm_retry_delay);
                }
                Err(err) => return Attempt::Failed(CandidateFailure::from_backend(model, err)),
            }
        }
    }
}
