//! # trellis-pipeline
//!
//! The context-to-task pipeline for trellis: takes an unprocessed context
//! entry, runs model extraction (via trellis-inference), and materializes
//! the sanitized candidates into the category and task stores.
//!
//! Composed entirely from the trellis-core repository traits so the
//! persistence step is testable against in-memory doubles.

pub mod materialize;

pub use materialize::ContextPipeline;

// Re-export core types
pub use trellis_core::*;
