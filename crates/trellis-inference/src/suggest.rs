//! Task suggestion engine.
//!
//! Given a task title and optional free-text context, produces a structured
//! improvement suggestion by delegating to the generation backend. The
//! engine never fails outward: a missing credential, a network error, or
//! unparseable model output all route to a deterministic default result
//! distinguishable only by `confidence = 0`.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::{debug, instrument, warn};

use trellis_core::{defaults, GenerationBackend, SuggestionResult};

use crate::sanitize::{
    default_deadline, sanitize_suggestion, strip_code_fence, truncate_chars,
};

/// Build the suggestion prompt for a task title and context.
pub fn suggestion_prompt(title: &str, context: &str) -> String {
    format!(
        r#"You are a smart task management assistant. Analyze the following task and provide suggestions:

Task: {title}
Context: {context}

Provide a JSON response with:
- improved_description: A more detailed and clear description (max 200 chars)
- priority_score: A number from 0-100 indicating priority
- suggested_deadline: A suggested deadline in ISO format (within next 30 days)
- suggested_category: One of: work, personal, health, learning, finance, shopping, travel
- confidence: Your confidence level (0-100) in these suggestions

Keep suggestions practical and actionable. Return only valid JSON without any markdown formatting.
"#
    )
}

/// Suggestion engine over an optional generation backend.
///
/// `None` means no model credential is configured; every call then takes
/// the default path without attempting network I/O.
pub struct SuggestionEngine {
    backend: Option<Arc<dyn GenerationBackend>>,
}

impl SuggestionEngine {
    /// Create an engine backed by the given model.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Create an engine with no model; all calls return defaults.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// Build from the environment: uses Gemini when `GEMINI_API_KEY` is
    /// set, otherwise a disabled engine.
    pub fn from_env() -> Self {
        match crate::GeminiBackend::from_env() {
            Some(backend) => Self::new(Arc::new(backend)),
            None => {
                debug!(
                    subsystem = "inference",
                    component = "suggestion_engine",
                    "No model credential configured, suggestions use defaults"
                );
                Self::disabled()
            }
        }
    }

    /// True when a generation backend is configured.
    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// The deterministic model-free result.
    pub fn default_suggestion(title: &str) -> SuggestionResult {
        SuggestionResult {
            improved_description: truncate_chars(
                &format!("Complete the task: {}", title),
                defaults::SUGGESTION_DESCRIPTION_MAX_CHARS,
            ),
            priority_score: defaults::DEFAULT_PRIORITY,
            suggested_deadline: default_deadline(Utc::now()),
            suggested_category: defaults::DEFAULT_CATEGORY.to_string(),
            confidence: 0,
        }
    }

    /// Produce a suggestion for a task. Infallible: any internal failure
    /// is logged and converted into the default result.
    #[instrument(skip(self, title, context), fields(subsystem = "inference", component = "suggestion_engine", op = "suggest"))]
    pub async fn suggest(&self, title: &str, context: &str) -> SuggestionResult {
        let Some(backend) = &self.backend else {
            return Self::default_suggestion(title);
        };

        let prompt = suggestion_prompt(title, context);
        let raw = match backend.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = true,
                    "Model invocation failed, returning default suggestion"
                );
                return Self::default_suggestion(title);
            }
        };

        let cleaned = strip_code_fence(&raw);
        match serde_json::from_str::<JsonValue>(cleaned) {
            Ok(value) => {
                let result = sanitize_suggestion(&value, title);
                debug!(
                    confidence = result.confidence,
                    priority = result.priority_score,
                    "Suggestion produced"
                );
                result
            }
            Err(e) => {
                warn!(
                    error = %e,
                    response_len = raw.len(),
                    fallback = true,
                    "Model returned unparseable JSON, returning default suggestion"
                );
                Self::default_suggestion(title)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGenerationBackend;
    use chrono::{Duration, Utc};

    #[test]
    fn test_prompt_embeds_title_and_context() {
        let prompt = suggestion_prompt("Buy milk", "We ran out this morning");
        assert!(prompt.contains("Buy milk"));
        assert!(prompt.contains("We ran out this morning"));
        assert!(prompt.contains("improved_description"));
        assert!(prompt.contains("priority_score"));
        assert!(prompt.contains("suggested_deadline"));
        assert!(prompt.contains("suggested_category"));
        assert!(prompt.contains("confidence"));
    }

    #[tokio::test]
    async fn test_disabled_engine_returns_exact_defaults() {
        let engine = SuggestionEngine::disabled();
        let before = Utc::now();
        let result = engine.suggest("Buy milk", "").await;
        let after = Utc::now();

        assert_eq!(result.improved_description, "Complete the task: Buy milk");
        assert_eq!(result.priority_score, 50);
        assert_eq!(result.suggested_category, "personal");
        assert_eq!(result.confidence, 0);
        assert!(result.suggested_deadline >= before + Duration::days(7) - Duration::seconds(1));
        assert!(result.suggested_deadline <= after + Duration::days(7));
    }

    #[tokio::test]
    async fn test_disabled_engine_makes_no_backend_calls() {
        let engine = SuggestionEngine::disabled();
        assert!(!engine.is_enabled());
        // Nothing to assert against a backend; the default path simply must
        // not panic and must complete without I/O.
        let _ = engine.suggest("Anything", "at all").await;
    }

    #[tokio::test]
    async fn test_suggest_sanitizes_model_output() {
        let backend = MockGenerationBackend::new().with_response(
            r#"{"improved_description": "Pick up milk on the way home",
                "priority_score": 150,
                "suggested_deadline": "2026-09-01T12:00:00Z",
                "suggested_category": "shopping",
                "confidence": 90}"#,
        );
        let engine = SuggestionEngine::new(Arc::new(backend));

        let result = engine.suggest("Buy milk", "").await;
        assert_eq!(result.improved_description, "Pick up milk on the way home");
        assert_eq!(result.priority_score, 100); // clamped from 150
        assert_eq!(result.suggested_category, "shopping");
        assert_eq!(result.confidence, 90);
    }

    #[tokio::test]
    async fn test_suggest_parses_fenced_output() {
        let backend = MockGenerationBackend::new()
            .with_response("```json\n{\"priority_score\": 20, \"confidence\": 60}\n```");
        let engine = SuggestionEngine::new(Arc::new(backend));

        let result = engine.suggest("Water the plants", "").await;
        assert_eq!(result.priority_score, 20);
        assert_eq!(result.confidence, 60);
    }

    #[tokio::test]
    async fn test_suggest_backend_error_falls_back() {
        let backend = MockGenerationBackend::new().failing();
        let engine = SuggestionEngine::new(Arc::new(backend));

        let result = engine.suggest("Buy milk", "").await;
        assert_eq!(result.improved_description, "Complete the task: Buy milk");
        assert_eq!(result.confidence, 0);
    }

    #[tokio::test]
    async fn test_suggest_malformed_json_falls_back() {
        let backend =
            MockGenerationBackend::new().with_response("sorry, I can't do JSON today");
        let engine = SuggestionEngine::new(Arc::new(backend));

        let result = engine.suggest("Buy milk", "").await;
        assert_eq!(result.confidence, 0);
        assert_eq!(result.suggested_category, "personal");
    }

    #[tokio::test]
    async fn test_suggest_long_title_default_stays_bounded() {
        let engine = SuggestionEngine::disabled();
        let title = "x".repeat(400);

        let result = engine.suggest(&title, "").await;
        assert!(result.improved_description.chars().count() <= 200);
    }

    #[tokio::test]
    async fn test_suggest_scores_always_in_range() {
        for response in [
            r#"{"priority_score": -5, "confidence": 400}"#,
            r#"{"priority_score": "urgent", "confidence": null}"#,
            r#"{}"#,
            r#"[1, 2, 3]"#,
        ] {
            let backend = MockGenerationBackend::new().with_response(response);
            let engine = SuggestionEngine::new(Arc::new(backend));
            let result = engine.suggest("Buy milk", "").await;
            assert!((0..=100).contains(&result.priority_score), "{}", response);
            assert!((0..=100).contains(&result.confidence), "{}", response);
            assert!(result.improved_description.chars().count() <= 200);
        }
    }
}
