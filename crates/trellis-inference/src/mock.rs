//! Mock generation backend for deterministic testing.
//!
//! Provides a [`GenerationBackend`] implementation that returns canned
//! responses, optionally fails, and records every prompt it receives.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trellis_inference::mock::MockGenerationBackend;
//!
//! let backend = MockGenerationBackend::new()
//!     .with_response(r#"{"priority_score": 75}"#);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use trellis_core::{Error, GenerationBackend, Result};

/// Mock generation backend for testing.
#[derive(Clone)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<String>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_response: String,
    fixed_responses: HashMap<String, String>,
    fail: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_response: "{}".to_string(),
            fixed_responses: HashMap::new(),
            fail: false,
        }
    }
}

impl MockGenerationBackend {
    /// Create a new mock backend returning `{}` for every prompt.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned for any prompt.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Add a response mapping for a specific prompt.
    pub fn with_response_mapping(
        mut self,
        prompt: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(prompt.into(), response.into());
        self
    }

    /// Make every generation call fail with an inference error.
    pub fn failing(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail = true;
        self
    }

    /// All prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of generation calls made.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.call_log.lock().unwrap().push(prompt.to_string());

        if self.config.fail {
            return Err(Error::Inference("Simulated failure for testing".to_string()));
        }

        if let Some(response) = self.config.fixed_responses.get(prompt) {
            return Ok(response.clone());
        }

        Ok(self.config.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
