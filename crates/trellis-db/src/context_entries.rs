//! Context entry repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use trellis_core::{
    new_v7, ContextEntry, ContextEntryRepository, CreateContextEntryRequest, Error, Result,
};

const ENTRY_COLUMNS: &str = "id, user_id, content, type, processed, created_at_utc";

/// PostgreSQL implementation of ContextEntryRepository.
#[derive(Clone)]
pub struct PgContextEntryRepository {
    pool: Pool<Postgres>,
}

impl PgContextEntryRepository {
    /// Create a new PgContextEntryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_entry(row: sqlx::postgres::PgRow) -> ContextEntry {
    let content_type: String = row.get("type");
    ContextEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        content: row.get("content"),
        // The type CHECK constraint guarantees a known value.
        content_type: content_type.parse().unwrap_or_default(),
        processed: row.get("processed"),
        created_at_utc: row.get("created_at_utc"),
    }
}

#[async_trait]
impl ContextEntryRepository for PgContextEntryRepository {
    async fn create(&self, user_id: Uuid, req: CreateContextEntryRequest) -> Result<ContextEntry> {
        let id = new_v7();
        let now = Utc::now();

        let row = sqlx::query(&format!(
            "INSERT INTO context_entry (id, user_id, content, type, processed, created_at_utc)
             VALUES ($1, $2, $3, $4, false, $5)
             RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(&req.content)
        .bind(req.content_type.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(map_row_to_entry(row))
    }

    async fn get(&self, id: Uuid) -> Result<Option<ContextEntry>> {
        let row = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM context_entry WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(map_row_to_entry))
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<ContextEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM context_entry
             WHERE user_id = $1 ORDER BY created_at_utc DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_entry).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM context_entry WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::ContextEntryNotFound(id));
        }
        Ok(())
    }

    async fn mark_processed(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("UPDATE context_entry SET processed = true WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::ContextEntryNotFound(id));
        }
        Ok(())
    }
}
