//! Materialization of extraction results into durable tasks.
//!
//! This is the point where untrusted (already sanitized) model output
//! becomes durable state. Writes are best-effort and sequential: one
//! failing candidate is skipped and the batch continues, and the entry is
//! marked processed even when zero candidates survived. There is no
//! rollback; partial success is an observable, intended outcome.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use trellis_core::{
    defaults, normalize_category_name, CategoryRepository, ContextEntry, ContextEntryRepository,
    CreateTaskRequest, Error, ExtractedTaskCandidate, ExtractionResult, ProcessedContext, Result,
    Task, TaskRepository, TaskStatus,
};
use trellis_inference::ContextExtractor;

/// Turns extraction results into categories and tasks, then retires the
/// source entry.
pub struct ContextPipeline {
    categories: Arc<dyn CategoryRepository>,
    tasks: Arc<dyn TaskRepository>,
    entries: Arc<dyn ContextEntryRepository>,
}

impl ContextPipeline {
    /// Create a pipeline over the given repositories.
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        tasks: Arc<dyn TaskRepository>,
        entries: Arc<dyn ContextEntryRepository>,
    ) -> Self {
        Self {
            categories,
            tasks,
            entries,
        }
    }

    /// Run extraction and materialization for one entry.
    ///
    /// The processed check runs before extraction so a repeated call never
    /// spends a model invocation on an entry that will be refused anyway.
    pub async fn process(
        &self,
        extractor: &ContextExtractor,
        entry: &ContextEntry,
    ) -> Result<ProcessedContext> {
        if entry.processed {
            return Err(Error::AlreadyProcessed(entry.id));
        }
        let result = extractor.extract(&entry.content, entry.content_type).await;
        self.materialize(entry, &result).await
    }

    /// Persist every candidate of an extraction result as a task, creating
    /// categories on demand, then mark the entry processed.
    ///
    /// Refuses entries already marked processed. Individual candidate
    /// failures are skipped; only the final `mark_processed` write (or a
    /// prior refusal) surfaces as an error.
    #[instrument(skip(self, entry, result), fields(subsystem = "pipeline", component = "materialize", entry_id = %entry.id, candidate_count = result.candidates.len()))]
    pub async fn materialize(
        &self,
        entry: &ContextEntry,
        result: &ExtractionResult,
    ) -> Result<ProcessedContext> {
        if entry.processed {
            return Err(Error::AlreadyProcessed(entry.id));
        }

        let mut created = Vec::new();
        for candidate in &result.candidates {
            match self.persist_candidate(entry, candidate).await {
                Ok(task) => {
                    debug!(task_id = %task.id, title = %task.title, "Created task from candidate");
                    created.push(task);
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        title = %candidate.title,
                        "Skipping candidate that failed to persist"
                    );
                }
            }
        }

        // The entry retires even when every candidate failed; reprocessing
        // the same content would duplicate whatever did succeed.
        self.entries.mark_processed(entry.id).await?;

        info!(
            created_count = created.len(),
            confidence = result.confidence,
            "Context entry materialized"
        );

        Ok(ProcessedContext {
            tasks: created,
            summary: result.summary.clone(),
            confidence: result.confidence,
        })
    }

    async fn persist_candidate(
        &self,
        entry: &ContextEntry,
        candidate: &ExtractedTaskCandidate,
    ) -> Result<Task> {
        let name = normalize_category_name(&candidate.suggested_category);
        let category = self
            .categories
            .get_or_create(
                entry.user_id,
                &name,
                defaults::DEFAULT_CATEGORY_COLOR,
                defaults::DEFAULT_CATEGORY_ICON,
            )
            .await?;

        self.tasks
            .create(CreateTaskRequest {
                user_id: entry.user_id,
                category_id: category.id,
                title: candidate.title.clone(),
                description: candidate.description.clone(),
                priority: candidate.priority_score,
                status: TaskStatus::Pending,
                due_date: None,
                ai_suggested: true,
            })
            .await
    }
}
