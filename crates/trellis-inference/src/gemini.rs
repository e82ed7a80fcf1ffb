//! Gemini inference backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use trellis_core::{defaults, Error, GenerationBackend, Result};

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = defaults::GEMINI_BASE_URL;

/// Default generation model.
pub const DEFAULT_GEMINI_MODEL: &str = defaults::GEMINI_MODEL;

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = defaults::GEN_TIMEOUT_SECS;

/// Gemini generation backend.
///
/// Thin synchronous-per-call client for the `generateContent` endpoint.
/// Construction requires a credential; the absence of one is handled by
/// [`GeminiBackend::from_env`] returning `None`, which callers treat as a
/// first-class "no model configured" state rather than an error.
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout_secs: u64,
}

impl GeminiBackend {
    /// Create a new Gemini backend with default settings.
    pub fn new(api_key: String) -> Self {
        Self::with_config(
            DEFAULT_GEMINI_BASE_URL.to_string(),
            DEFAULT_GEMINI_MODEL.to_string(),
            api_key,
        )
    }

    /// Create a new Gemini backend with custom configuration.
    pub fn with_config(base_url: String, model: String, api_key: String) -> Self {
        let timeout_secs = std::env::var("TRELLIS_GEN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(GEN_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            subsystem = "inference",
            component = "gemini",
            model = %model,
            "Initializing Gemini backend: url={}",
            base_url
        );

        Self {
            client,
            base_url,
            model,
            api_key,
            timeout_secs,
        }
    }

    /// Create from environment variables.
    ///
    /// Credential resolution: `GEMINI_API_KEY` env var; unset or empty means
    /// no model is configured and `None` is returned (no network attempt is
    /// ever made on that path). `GEMINI_BASE_URL` and `GEMINI_MODEL`
    /// override the endpoint and model.
    pub fn from_env() -> Option<Self> {
        let api_key = match std::env::var("GEMINI_API_KEY") {
            Ok(val) if !val.trim().is_empty() => val,
            _ => return None,
        };

        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        Some(Self::with_config(base_url, model, api_key))
    }
}

/// Request payload for the Gemini `generateContent` endpoint.
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

/// A content block: one turn of parts.
#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Response from the Gemini `generateContent` endpoint.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    #[instrument(skip(self, prompt), fields(subsystem = "inference", component = "gemini", op = "generate", model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::Inference("Empty response from Gemini".to_string()))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = text.len(),
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > 10_000 {
            warn!(
                duration_ms = elapsed,
                prompt_len = prompt.len(),
                slow = true,
                "Slow generation operation"
            );
        }
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Backend Configuration Tests
    // ==========================================================================

    #[test]
    fn test_default_constants() {
        assert_eq!(
            DEFAULT_GEMINI_BASE_URL,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(GEN_TIMEOUT_SECS, 30);
    }

    #[test]
    fn test_default_config() {
        let backend = GeminiBackend::new("secret".to_string());
        assert_eq!(backend.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(backend.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(backend.api_key, "secret");
    }

    #[test]
    fn test_custom_config() {
        let backend = GeminiBackend::with_config(
            "http://custom:1234".to_string(),
            "custom-model".to_string(),
            "key".to_string(),
        );
        assert_eq!(backend.base_url, "http://custom:1234");
        assert_eq!(backend.model, "custom-model");
        assert_eq!(GenerationBackend::model_name(&backend), "custom-model");
    }

    // ==========================================================================
    // Request/Response Struct Tests
    // ==========================================================================

    #[test]
    fn test_generate_content_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"contents\""));
        assert!(json.contains("\"parts\""));
        assert!(json.contains("hello"));
    }

    #[test]
    fn test_generate_content_response_deserialization() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "the reply"}], "role": "model"}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(response.candidates[0].content.parts[0].text, "the reply");
    }

    #[test]
    fn test_generate_content_response_no_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
    }
}
