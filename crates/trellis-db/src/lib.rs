//! # trellis-db
//!
//! PostgreSQL database layer for trellis.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for all core entities
//! - Embedded migrations (feature `migrations`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use trellis_db::Database;
//! use trellis_core::{ContentType, CreateContextEntryRequest, ContextEntryRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/trellis").await?;
//!
//!     let user = db.users.get_or_create("default_user", "user@example.com").await?;
//!     let entry = db.context_entries.create(user.id, CreateContextEntryRequest {
//!         content: "Don't forget the dentist on Tuesday".to_string(),
//!         content_type: ContentType::Note,
//!     }).await?;
//!
//!     println!("Created entry: {}", entry.id);
//!     Ok(())
//! }
//! ```

pub mod categories;
pub mod context_entries;
pub mod pool;
pub mod tasks;
pub mod users;

// Test fixtures for integration tests.
// Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL.
pub mod test_fixtures;

// Re-export core types
pub use trellis_core::*;

// Re-export repository implementations
pub use categories::PgCategoryRepository;
pub use context_entries::PgContextEntryRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use tasks::PgTaskRepository;
pub use users::PgUserRepository;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// User repository.
    pub users: PgUserRepository,
    /// Category repository.
    pub categories: PgCategoryRepository,
    /// Task repository.
    pub tasks: PgTaskRepository,
    /// Context entry repository.
    pub context_entries: PgContextEntryRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            categories: PgCategoryRepository::new(pool.clone()),
            tasks: PgTaskRepository::new(pool.clone()),
            context_entries: PgContextEntryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the database and build all repositories.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}
