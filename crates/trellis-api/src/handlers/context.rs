//! Context entry HTTP handlers, including the extraction endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiError, AppState};
use trellis_core::{
    ContentType, ContextEntry, ContextEntryRepository, CreateContextEntryRequest, Task,
};

/// Request body for creating a context entry.
#[derive(Debug, Deserialize)]
pub struct CreateContextEntryBody {
    pub content: String,
    #[serde(rename = "type", default)]
    pub content_type: ContentType,
}

/// Response for the process endpoint.
#[derive(Debug, Serialize)]
pub struct ProcessContextResponse {
    pub message: String,
    pub tasks: Vec<Task>,
    pub summary: String,
    pub confidence: i32,
}

/// List the user's context entries.
pub async fn list_context_entries(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContextEntry>>, ApiError> {
    let user = state.default_user().await?;
    let entries = state.db.context_entries.list(user.id).await?;
    Ok(Json(entries))
}

/// Create a context entry.
pub async fn create_context_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateContextEntryBody>,
) -> Result<(StatusCode, Json<ContextEntry>), ApiError> {
    if body.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Content must not be empty".to_string(),
        ));
    }

    let user = state.default_user().await?;
    let entry = state
        .db
        .context_entries
        .create(
            user.id,
            CreateContextEntryRequest {
                content: body.content,
                content_type: body.content_type,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Get a context entry by ID.
pub async fn get_context_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContextEntry>, ApiError> {
    let entry = state
        .db
        .context_entries
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Context entry {} not found", id)))?;
    Ok(Json(entry))
}

/// Delete a context entry.
pub async fn delete_context_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.db.context_entries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Extract tasks from a context entry and persist them.
///
/// Responds 409 when the entry was already processed. Model failures never
/// surface here: extraction degrades to a default result, so this endpoint
/// only errors on storage problems.
pub async fn process_context_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProcessContextResponse>, ApiError> {
    let entry = state
        .db
        .context_entries
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Context entry {} not found", id)))?;

    let processed = state.pipeline.process(&state.extractor, &entry).await?;

    Ok(Json(ProcessContextResponse {
        message: format!("Created {} tasks from context", processed.tasks.len()),
        tasks: processed.tasks,
        summary: processed.summary,
        confidence: processed.confidence,
    }))
}
