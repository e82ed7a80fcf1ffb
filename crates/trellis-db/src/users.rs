//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use trellis_core::{new_v7, Error, Result, User, UserRepository};

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_user(row: sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        created_at_utc: row.get("created_at_utc"),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_or_create(&self, username: &str, email: &str) -> Result<User> {
        // Insert-then-fetch keeps this race-safe under concurrent requests:
        // a conflicting insert is a no-op and the follow-up select sees
        // whichever row won.
        sqlx::query(
            "INSERT INTO app_user (id, username, email, created_at_utc)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(new_v7())
        .bind(username)
        .bind(email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        let row = sqlx::query(
            "SELECT id, username, email, created_at_utc FROM app_user WHERE username = $1",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(map_row_to_user(row))
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, created_at_utc FROM app_user WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(map_row_to_user))
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, username, email, created_at_utc FROM app_user ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_user).collect())
    }
}
