//! Application state shared across handlers.

use std::sync::Arc;

use trellis_core::{defaults, Result, User, UserRepository};
use trellis_db::Database;
use trellis_inference::{ContextExtractor, SuggestionEngine};
use trellis_pipeline::ContextPipeline;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub suggestions: Arc<SuggestionEngine>,
    pub extractor: Arc<ContextExtractor>,
    pub pipeline: Arc<ContextPipeline>,
}

impl AppState {
    /// Build the state, wiring the pipeline onto the database repositories.
    pub fn new(db: Database, suggestions: SuggestionEngine, extractor: ContextExtractor) -> Self {
        let pipeline = ContextPipeline::new(
            Arc::new(db.categories.clone()),
            Arc::new(db.tasks.clone()),
            Arc::new(db.context_entries.clone()),
        );
        Self {
            db,
            suggestions: Arc::new(suggestions),
            extractor: Arc::new(extractor),
            pipeline: Arc::new(pipeline),
        }
    }

    /// Resolve the implicit single user.
    ///
    /// The core stays user-agnostic; this is the only place the
    /// default-user convention lives.
    pub async fn default_user(&self) -> Result<User> {
        self.db
            .users
            .get_or_create(defaults::DEFAULT_USERNAME, defaults::DEFAULT_USER_EMAIL)
            .await
    }
}
