//! Task HTTP handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiError, AppState};
use trellis_core::{
    defaults, CreateTaskRequest, ListTasksRequest, PriorityBand, SuggestionResult, Task,
    TaskRepository, TaskStats, TaskStatus, UpdateTaskRequest,
};

/// Query parameters for listing tasks.
///
/// `status` and `priority` accept `all` (or can be omitted) to disable
/// that filter, matching the frontend's filter dropdowns.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<String>,
    pub category: Option<Uuid>,
    pub priority: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn parse_filter<T: std::str::FromStr<Err = trellis_core::Error>>(
    raw: Option<&str>,
) -> Result<Option<T>, ApiError> {
    match raw {
        None | Some("all") => Ok(None),
        Some(value) => Ok(Some(value.parse().map_err(ApiError::from)?)),
    }
}

impl ListTasksQuery {
    fn into_request(self) -> Result<ListTasksRequest, ApiError> {
        Ok(ListTasksRequest {
            status: parse_filter::<TaskStatus>(self.status.as_deref())?,
            category_id: self.category,
            priority: parse_filter::<PriorityBand>(self.priority.as_deref())?,
            search: self.search.filter(|s| !s.trim().is_empty()),
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Request body for creating a task.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Option<i32>,
    pub status: Option<TaskStatus>,
    pub category_id: Uuid,
    pub due_date: Option<DateTime<Utc>>,
}

/// Request body for updating a task.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTaskBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub status: Option<TaskStatus>,
    pub category_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Request body for AI task suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestTaskBody {
    pub title: String,
    #[serde(default)]
    pub context: String,
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title must not be empty".to_string()));
    }
    if title.chars().count() > defaults::TITLE_MAX_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Title must be at most {} characters",
            defaults::TITLE_MAX_CHARS
        )));
    }
    Ok(())
}

/// List the user's tasks with optional filters.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let user = state.default_user().await?;
    let tasks = state.db.tasks.list(user.id, query.into_request()?).await?;
    Ok(Json(tasks))
}

/// Create a task.
pub async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    validate_title(&body.title)?;

    let user = state.default_user().await?;
    let task = state
        .db
        .tasks
        .create(CreateTaskRequest {
            user_id: user.id,
            category_id: body.category_id,
            title: body.title,
            description: body.description,
            priority: body
                .priority
                .unwrap_or(defaults::DEFAULT_PRIORITY)
                .clamp(defaults::SCORE_MIN, defaults::SCORE_MAX),
            status: body.status.unwrap_or_default(),
            due_date: body.due_date,
            ai_suggested: false,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by ID.
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .db
        .tasks
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;
    Ok(Json(task))
}

/// Partially update a task.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<Task>, ApiError> {
    if let Some(title) = &body.title {
        validate_title(title)?;
    }

    let task = state
        .db
        .tasks
        .update(
            id,
            UpdateTaskRequest {
                title: body.title,
                description: body.description,
                priority: body
                    .priority
                    .map(|p| p.clamp(defaults::SCORE_MIN, defaults::SCORE_MAX)),
                status: body.status,
                category_id: body.category_id,
                due_date: body.due_date,
            },
        )
        .await?;
    Ok(Json(task))
}

/// Delete a task.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.db.tasks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a task between completed and pending.
pub async fn toggle_task_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let task = state.db.tasks.toggle_status(id).await?;
    Ok(Json(task))
}

/// Get task statistics for the user.
pub async fn task_stats(
    State(state): State<AppState>,
) -> Result<Json<TaskStats>, ApiError> {
    let user = state.default_user().await?;
    let stats = state.db.tasks.stats(user.id).await?;
    Ok(Json(stats))
}

/// Get an AI suggestion for a task title plus optional context.
///
/// Always responds 200 with a schema-valid suggestion; a degraded/default
/// result is distinguishable only by `confidence = 0`.
pub async fn ai_suggestions(
    State(state): State<AppState>,
    Json(body): Json<SuggestTaskBody>,
) -> Result<Json<SuggestionResult>, ApiError> {
    validate_title(&body.title)?;
    let suggestion = state.suggestions.suggest(&body.title, &body.context).await;
    Ok(Json(suggestion))
}
