//! Core traits for trellis abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// USER REPOSITORY TRAITS
// =============================================================================

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by username, creating it if missing.
    ///
    /// Carries the single-user deployment concern: the API layer resolves
    /// its implicit default user through this call.
    async fn get_or_create(&self, username: &str, email: &str) -> Result<User>;

    /// Fetch a user by ID.
    async fn get(&self, id: Uuid) -> Result<Option<User>>;

    /// List all users.
    async fn list(&self) -> Result<Vec<User>>;
}

// =============================================================================
// CATEGORY REPOSITORY TRAITS
// =============================================================================

/// Repository for task categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category for a user.
    async fn create(&self, user_id: Uuid, req: CreateCategoryRequest) -> Result<Category>;

    /// Fetch a category by ID.
    async fn get(&self, id: Uuid) -> Result<Option<Category>>;

    /// Fetch the category named `name` for a user, creating it with the
    /// given color and icon if missing. The caller is expected to pass an
    /// already-normalized name (see [`normalize_category_name`]).
    async fn get_or_create(
        &self,
        user_id: Uuid,
        name: &str,
        color: &str,
        icon: &str,
    ) -> Result<Category>;

    /// List a user's categories ordered by name.
    async fn list(&self, user_id: Uuid) -> Result<Vec<Category>>;

    /// Update a category.
    async fn update(&self, id: Uuid, req: UpdateCategoryRequest) -> Result<Category>;

    /// Delete a category (cascades to its tasks).
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// TASK REPOSITORY TRAITS
// =============================================================================

/// Repository for task CRUD operations.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task.
    async fn create(&self, req: CreateTaskRequest) -> Result<Task>;

    /// Fetch a task by ID.
    async fn get(&self, id: Uuid) -> Result<Option<Task>>;

    /// List a user's tasks with filtering and pagination,
    /// newest first.
    async fn list(&self, user_id: Uuid, req: ListTasksRequest) -> Result<Vec<Task>>;

    /// Update a task.
    async fn update(&self, id: Uuid, req: UpdateTaskRequest) -> Result<Task>;

    /// Delete a task.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Flip a task between completed and pending: completed tasks reopen,
    /// anything else completes.
    async fn toggle_status(&self, id: Uuid) -> Result<Task>;

    /// Aggregate task counts for a user.
    async fn stats(&self, user_id: Uuid) -> Result<TaskStats>;
}

// =============================================================================
// CONTEXT ENTRY REPOSITORY TRAITS
// =============================================================================

/// Repository for context entries.
#[async_trait]
pub trait ContextEntryRepository: Send + Sync {
    /// Insert a new context entry with `processed = false`.
    async fn create(&self, user_id: Uuid, req: CreateContextEntryRequest) -> Result<ContextEntry>;

    /// Fetch a context entry by ID.
    async fn get(&self, id: Uuid) -> Result<Option<ContextEntry>>;

    /// List a user's context entries, newest first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<ContextEntry>>;

    /// Delete a context entry.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Set the entry's `processed` flag to true.
    async fn mark_processed(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Backend for text generation (LLM).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
