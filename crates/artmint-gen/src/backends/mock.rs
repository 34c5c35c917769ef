//! Mock backend for testing
//!
//! Replays scripted per-model outcomes without any network calls and
//! records the exact sequence of attempts, so resolver tests can assert
//! the candidate walk (retry-once-on-warming, skip-on-unavailable).

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::backend::{BackendError, GenerationBackend};

/// One scripted response for a model candidate
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Bytes(Vec<u8>),
    Warming,
    Unavailable(u16),
    Failed(String),
}

/// A backend that serves scripted outcomes and logs every attempt
#[derive(Default)]
pub struct MockBackend {
    script: Mutex<HashMap<String, VecDeque<MockOutcome>>>,
    calls: Mutex<Vec<String>>,
}

impl MockBackend {
    /// A backend with no script: every call succeeds with bytes derived
    /// from the prompt and model, so distinct prompts hash differently
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next call against `model`.
    ///
    /// Outcomes are consumed in FIFO order; once a model's queue is
    /// empty, calls fall back to deterministic success bytes.
    pub fn enqueue(&self, model: &str, outcome: MockOutcome) {
        self.script
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(outcome);
    }

    /// The models attempted so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn default_bytes(prompt: &str, model: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(prompt.as_bytes());
        hasher.update(b"\x00");
        hasher.update(model.as_bytes());
        hasher.finalize().to_vec()
    }
}

impl GenerationBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate(&self, prompt: &str, model: &str) -> Result<Vec<u8>, BackendError> {
        self.calls.lock().unwrap().push(model.to_string());

        let next = self
            .script
            .lock()
            .unwrap()
            .get_mut(model)
            .and_then(|queue| queue.pop_front());

        match next {
            None => Ok(Self::default_bytes(prompt, model)),
            Some(MockOutcome::Bytes(bytes)) => Ok(bytes),
            Some(MockOutcome::Warming) => Err(BackendError::Warming),
            Some(MockOutcome::Unavailable(code)) => Err(BackendError::Unavailable(code)),
            Some(MockOutcome::Failed(msg)) => Err(BackendError::Failed(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscripted_calls_succeed_deterministically() {
        let backend = MockBackend::succeeding();
        let a = backend.generate("a cat", "m1").unwrap();
        let b = backend.generate("a cat", "m1").unwrap();
        assert_eq!(a, b);
        let c = backend.generate("a dog", "m1").unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_scripted_outcomes_consumed_in_order() {
        let backend = MockBackend::succeeding();
        backend.enqueue("m1", MockOutcome::Warming);
        backend.enqueue("m1", MockOutcome::Bytes(vec![1, 2, 3]));

        assert_eq!(
            backend.generate("p", "m1").unwrap_err(),
            BackendError::Warming
        );
        assert_eq!(backend.generate("p", "m1").unwrap(), vec![1, 2, 3]);
        assert_eq!(backend.calls(), vec!["m1", "m1"]);
    }
}
