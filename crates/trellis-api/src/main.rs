//! trellis-api - HTTP API server for trellis

mod error;
mod handlers;
mod state;

use std::net::SocketAddr;

use axum::{
    http::Request,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use trellis_core::defaults;
use trellis_db::Database;
use trellis_inference::{ContextExtractor, SuggestionEngine};

pub(crate) use error::ApiError;
pub(crate) use state::AppState;

use handlers::{
    categories::{
        create_category, delete_category, list_categories, seed_default_categories,
        update_category,
    },
    context::{
        create_context_entry, delete_context_entry, get_context_entry, list_context_entries,
        process_context_entry,
    },
    tasks::{
        ai_suggestions, create_task, delete_task, get_task, list_tasks, task_stats,
        toggle_task_status, update_task,
    },
    users::me,
};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically, which
/// helps with log correlation and debugging.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// HEALTH
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   RUST_LOG    - standard env filter (default: "trellis_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trellis_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Get configuration from environment
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/trellis".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(defaults::SERVER_PORT);

    // Database
    let db = Database::connect(&database_url).await?;
    db.migrate().await?;
    info!("Database ready");

    // Model integration. Credential absence is a handled state: the
    // engines degrade to deterministic defaults without network I/O.
    let suggestions = SuggestionEngine::from_env();
    let extractor = ContextExtractor::from_env();
    info!(
        model_configured = suggestions.is_enabled(),
        "AI engines initialized"
    );

    let state = AppState::new(db, suggestions, extractor);

    let app = Router::new()
        .route("/health", get(health_check))
        // Tasks
        .route("/api/v1/tasks", get(list_tasks).post(create_task))
        .route("/api/v1/tasks/stats", get(task_stats))
        .route("/api/v1/tasks/suggestions", post(ai_suggestions))
        .route(
            "/api/v1/tasks/:id",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route("/api/v1/tasks/:id/status", patch(toggle_task_status))
        // Categories
        .route(
            "/api/v1/categories",
            get(list_categories).post(create_category),
        )
        .route("/api/v1/categories/defaults", post(seed_default_categories))
        .route(
            "/api/v1/categories/:id",
            patch(update_category).delete(delete_category),
        )
        // Context entries
        .route(
            "/api/v1/context-entries",
            get(list_context_entries).post(create_context_entry),
        )
        .route(
            "/api/v1/context-entries/:id",
            get(get_context_entry).delete(delete_context_entry),
        )
        .route(
            "/api/v1/context-entries/:id/process",
            post(process_context_entry),
        )
        // Users
        .route("/api/v1/users/me", get(me))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
