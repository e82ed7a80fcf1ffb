//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use trellis_core::Error;

/// API-level error wrapper mapping core errors onto HTTP statuses.
#[derive(Debug)]
pub enum ApiError {
    Internal(Error),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            Error::TaskNotFound(_)
            | Error::CategoryNotFound(_)
            | Error::ContextEntryNotFound(_) => ApiError::NotFound(err.to_string()),
            Error::AlreadyProcessed(_) => ApiError::Conflict(err.to_string()),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            Error::Database(sqlx_err) => {
                let msg = sqlx_err.to_string();
                if msg.contains("duplicate key") || msg.contains("unique constraint") {
                    return ApiError::Conflict(msg);
                }
                if msg.contains("foreign key") || msg.contains("check constraint") {
                    return ApiError::BadRequest(msg);
                }
                ApiError::Internal(err)
            }
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
