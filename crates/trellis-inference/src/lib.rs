//! # trellis-inference
//!
//! External-LLM integration for trellis.
//!
//! This crate provides:
//! - Gemini generation backend (the only external credential the system
//!   takes; its absence is a handled state, not an error)
//! - Suggestion engine: title + context → structured improvement suggestion
//! - Context extractor: unstructured text → actionable task candidates
//! - Sanitizers that clamp and bound every field of the model's untrusted
//!   JSON output
//!
//! Both engines absorb every model-related failure and degrade to
//! deterministic defaults distinguishable by `confidence = 0`; they never
//! surface an error to their caller.
//!
//! # Feature Flags
//!
//! - `mock`: Expose the mock generation backend to downstream test suites.

pub mod extract;
pub mod gemini;
pub mod sanitize;
pub mod suggest;

// Mock generation backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use trellis_core::*;

pub use extract::{extraction_prompt, ContextExtractor};
pub use gemini::GeminiBackend;
pub use sanitize::{
    clamp_score, default_deadline, parse_deadline, sanitize_extraction, sanitize_suggestion,
    strip_code_fence, truncate_chars,
};
pub use suggest::{suggestion_prompt, SuggestionEngine};
