//! Artmint Gen - AI image acquisition pipeline
//!
//! Turns a text prompt and a style identifier into raw image bytes by
//! driving an external generative backend through a prioritized list of
//! model candidates, with one retry on a warming model and graceful
//! degradation to a locally synthesized placeholder when every candidate
//! fails. The pipeline downstream always receives valid bytes.

pub mod backend;
pub mod backends;
pub mod config;
pub mod placeholder;
pub mod resolver;
pub mod style;

pub use backend::{BackendError, GenerationBackend};
pub use config::GenConfig;
pub use resolver::{CandidateFailure, ImageResolver, ResolvedImage};
pub use style::{Style, StyleBook, DEFAULT_STYLE};
