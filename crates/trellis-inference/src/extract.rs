//! Context-to-task extraction.
//!
//! Given a block of unstructured text (an email, a note, a message),
//! delegates to the generation backend to distill actionable task
//! candidates plus a summary. Like the suggestion engine, extraction is
//! infallible: every failure path yields a default result with a single
//! generic candidate and `confidence = 0`. Persisting the candidates is a
//! separate step owned by the pipeline crate.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{debug, instrument, warn};

use trellis_core::{
    defaults, ContentType, ExtractedTaskCandidate, ExtractionResult, GenerationBackend,
};

use crate::sanitize::{sanitize_extraction, strip_code_fence};

/// Build the extraction prompt for a block of content.
pub fn extraction_prompt(content: &str, content_type: ContentType) -> String {
    format!(
        r#"Analyze the following {content_type} content and extract actionable tasks:

Content: {content}

Provide a JSON response with:
- extracted_tasks: Array of task objects, each with:
  - title: Clear, actionable task title
  - description: Brief description
  - priority_score: Priority from 0-100
  - suggested_category: One of: work, personal, health, learning, finance, shopping, travel
- summary: Brief summary of the content
- confidence: Your confidence level (0-100) in the extraction

Extract 1-5 most important actionable tasks. Return only valid JSON without any markdown formatting.
"#
    )
}

/// Context extractor over an optional generation backend.
pub struct ContextExtractor {
    backend: Option<Arc<dyn GenerationBackend>>,
}

impl ContextExtractor {
    /// Create an extractor backed by the given model.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Create an extractor with no model; all calls return defaults.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// Build from the environment: uses Gemini when `GEMINI_API_KEY` is
    /// set, otherwise a disabled extractor.
    pub fn from_env() -> Self {
        match crate::GeminiBackend::from_env() {
            Some(backend) => Self::new(Arc::new(backend)),
            None => {
                debug!(
                    subsystem = "inference",
                    component = "context_extractor",
                    "No model credential configured, extraction uses defaults"
                );
                Self::disabled()
            }
        }
    }

    /// True when a generation backend is configured.
    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// The deterministic model-free result: one generic review task.
    pub fn default_extraction(content_type: ContentType) -> ExtractionResult {
        ExtractionResult {
            candidates: vec![ExtractedTaskCandidate {
                title: format!("Review {} content", content_type),
                description: format!(
                    "Process and act on the {} content provided",
                    content_type
                ),
                priority_score: defaults::DEFAULT_PRIORITY,
                suggested_category: defaults::DEFAULT_CATEGORY.to_string(),
            }],
            summary: format!("Content from {} needs review", content_type),
            confidence: 0,
        }
    }

    /// Extract task candidates from content. Infallible: any internal
    /// failure is logged and converted into the default result.
    #[instrument(skip(self, content), fields(subsystem = "inference", component = "context_extractor", op = "extract", content_len = content.len()))]
    pub async fn extract(&self, content: &str, content_type: ContentType) -> ExtractionResult {
        let Some(backend) = &self.backend else {
            return Self::default_extraction(content_type);
        };

        let prompt = extraction_prompt(content, content_type);
        let raw = match backend.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = true,
                    "Model invocation failed, returning default extraction"
                );
                return Self::default_extraction(content_type);
            }
        };

        let cleaned = strip_code_fence(&raw);
        match serde_json::from_str::<JsonValue>(cleaned) {
            Ok(value) => {
                let result = sanitize_extraction(&value);
                debug!(
                    candidate_count = result.candidates.len(),
                    confidence = result.confidence,
                    "Extraction produced"
                );
                result
            }
            Err(e) => {
                warn!(
                    error = %e,
                    response_len = raw.len(),
                    fallback = true,
                    "Model returned unparseable JSON, returning default extraction"
                );
                Self::default_extraction(content_type)
            }
        }
    }
}
