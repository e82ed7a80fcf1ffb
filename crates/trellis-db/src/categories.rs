//! Category repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use trellis_core::{
    defaults, new_v7, Category, CategoryRepository, CreateCategoryRequest, Error, Result,
    UpdateCategoryRequest,
};

/// PostgreSQL implementation of CategoryRepository.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: Pool<Postgres>,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_category(row: sqlx::postgres::PgRow) -> Category {
    Category {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        color: row.get("color"),
        icon: row.get("icon"),
        created_at_utc: row.get("created_at_utc"),
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, user_id: Uuid, req: CreateCategoryRequest) -> Result<Category> {
        let id = new_v7();
        let now = Utc::now();
        let color = req
            .color
            .unwrap_or_else(|| defaults::DEFAULT_CATEGORY_COLOR.to_string());
        let icon = req
            .icon
            .unwrap_or_else(|| defaults::DEFAULT_CATEGORY_ICON.to_string());

        let row = sqlx::query(
            "INSERT INTO category (id, user_id, name, color, icon, created_at_utc)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, user_id, name, color, icon, created_at_utc",
        )
        .bind(id)
        .bind(user_id)
        .bind(&req.name)
        .bind(&color)
        .bind(&icon)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(map_row_to_category(row))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Category>> {
        let row = sqlx::query(
            "SELECT id, user_id, name, color, icon, created_at_utc
             FROM category WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(map_row_to_category))
    }

    async fn get_or_create(
        &self,
        user_id: Uuid,
        name: &str,
        color: &str,
        icon: &str,
    ) -> Result<Category> {
        // Race-safe under the (user_id, name) unique constraint: a losing
        // insert becomes a no-op and the follow-up select returns the winner.
        sqlx::query(
            "INSERT INTO category (id, user_id, name, color, icon, created_at_utc)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id, name) DO NOTHING",
        )
        .bind(new_v7())
        .bind(user_id)
        .bind(name)
        .bind(color)
        .bind(icon)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        let row = sqlx::query(
            "SELECT id, user_id, name, color, icon, created_at_utc
             FROM category WHERE user_id = $1 AND name = $2",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(map_row_to_category(row))
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT id, user_id, name, color, icon, created_at_utc
             FROM category WHERE user_id = $1 ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_category).collect())
    }

    async fn update(&self, id: Uuid, req: UpdateCategoryRequest) -> Result<Category> {
        let row = sqlx::query(
            "UPDATE category
             SET name = COALESCE($1, name),
                 color = COALESCE($2, color),
                 icon = COALESCE($3, icon)
             WHERE id = $4
             RETURNING id, user_id, name, color, icon, created_at_utc",
        )
        .bind(req.name)
        .bind(req.color)
        .bind(req.icon)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(map_row_to_category)
            .ok_or(Error::CategoryNotFound(id))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::CategoryNotFound(id));
        }
        Ok(())
    }
}
