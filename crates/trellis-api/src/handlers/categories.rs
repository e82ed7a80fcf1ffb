//! Category HTTP handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiError, AppState};
use trellis_core::{
    defaults, Category, CategoryRepository, CreateCategoryRequest, UpdateCategoryRequest,
};

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryBody {
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Request body for updating a category.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateCategoryBody {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Response for the default-category seeding endpoint.
#[derive(Debug, Serialize)]
pub struct SeedCategoriesResponse {
    pub message: String,
    pub categories: Vec<Category>,
}

/// List the user's categories.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let user = state.default_user().await?;
    let categories = state.db.categories.list(user.id).await?;
    Ok(Json(categories))
}

/// Create a category.
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryBody>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name must not be empty".to_string()));
    }

    let user = state.default_user().await?;
    let category = state
        .db
        .categories
        .create(
            user.id,
            CreateCategoryRequest {
                name: body.name,
                color: body.color,
                icon: body.icon,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Seed the standard set of categories for the user.
///
/// Idempotent: existing categories keep their customized color and icon.
pub async fn seed_default_categories(
    State(state): State<AppState>,
) -> Result<Json<SeedCategoriesResponse>, ApiError> {
    let user = state.default_user().await?;

    let mut categories = Vec::with_capacity(defaults::SEED_CATEGORIES.len());
    for (name, color, icon) in defaults::SEED_CATEGORIES {
        let category = state
            .db
            .categories
            .get_or_create(user.id, name, color, icon)
            .await?;
        categories.push(category);
    }

    Ok(Json(SeedCategoriesResponse {
        message: format!("Ensured {} default categories", categories.len()),
        categories,
    }))
}

/// Partially update a category.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCategoryBody>,
) -> Result<Json<Category>, ApiError> {
    let category = state
        .db
        .categories
        .update(
            id,
            UpdateCategoryRequest {
                name: body.name,
                color: body.color,
                icon: body.icon,
            },
        )
        .await?;
    Ok(Json(category))
}

/// Delete a category and its tasks.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.db.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
