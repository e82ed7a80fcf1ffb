//! User HTTP handlers.

use axum::{extract::State, Json};

use crate::{ApiError, AppState};
use trellis_core::User;

/// Get (or lazily create) the current user.
pub async fn me(State(state): State<AppState>) -> Result<Json<User>, ApiError> {
    let user = state.default_user().await?;
    Ok(Json(user))
}
