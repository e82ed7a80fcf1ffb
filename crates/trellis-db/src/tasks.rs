//! Task repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use trellis_core::{
    defaults, new_v7, CreateTaskRequest, Error, ListTasksRequest, PriorityBand, Result, Task,
    TaskRepository, TaskStats, UpdateTaskRequest,
};

use crate::escape_like;

const TASK_COLUMNS: &str = "id, user_id, category_id, title, description, priority, status, \
                            due_date, ai_suggested, created_at_utc, updated_at_utc";

/// PostgreSQL implementation of TaskRepository.
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: Pool<Postgres>,
}

impl PgTaskRepository {
    /// Create a new PgTaskRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_task(row: sqlx::postgres::PgRow) -> Task {
    let status: String = row.get("status");
    Task {
        id: row.get("id"),
        user_id: row.get("user_id"),
        category_id: row.get("category_id"),
        title: row.get("title"),
        description: row.get("description"),
        priority: row.get("priority"),
        // The status CHECK constraint guarantees a known value.
        status: status.parse().unwrap_or_default(),
        due_date: row.get("due_date"),
        ai_suggested: row.get("ai_suggested"),
        created_at_utc: row.get("created_at_utc"),
        updated_at_utc: row.get("updated_at_utc"),
    }
}

/// Build the priority-band clause for the list query.
///
/// Bands use the same thresholds as [`PriorityBand::from_priority`], so the
/// SQL filter and the in-memory label can never disagree.
fn priority_band_clause(band: PriorityBand) -> String {
    match band {
        PriorityBand::High => format!("AND priority >= {} ", defaults::PRIORITY_HIGH_THRESHOLD),
        PriorityBand::Medium => format!(
            "AND priority >= {} AND priority < {} ",
            defaults::PRIORITY_MEDIUM_THRESHOLD,
            defaults::PRIORITY_HIGH_THRESHOLD
        ),
        PriorityBand::Low => format!("AND priority < {} ", defaults::PRIORITY_MEDIUM_THRESHOLD),
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, req: CreateTaskRequest) -> Result<Task> {
        let id = new_v7();
        let now = Utc::now();

        let row = sqlx::query(&format!(
            "INSERT INTO task (id, user_id, category_id, title, description, priority, status, \
                               due_date, ai_suggested, created_at_utc, updated_at_utc)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .bind(req.user_id)
        .bind(req.category_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.priority)
        .bind(req.status.as_str())
        .bind(req.due_date)
        .bind(req.ai_suggested)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(map_row_to_task(row))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>> {
        let row = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM task WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(map_row_to_task))
    }

    async fn list(&self, user_id: Uuid, req: ListTasksRequest) -> Result<Vec<Task>> {
        let mut query = format!("SELECT {TASK_COLUMNS} FROM task WHERE user_id = $1 ");
        let mut param_idx = 2;

        if req.status.is_some() {
            query.push_str(&format!("AND status = ${} ", param_idx));
            param_idx += 1;
        }
        if req.category_id.is_some() {
            query.push_str(&format!("AND category_id = ${} ", param_idx));
            param_idx += 1;
        }
        if let Some(band) = req.priority {
            query.push_str(&priority_band_clause(band));
        }
        if req.search.is_some() {
            query.push_str(&format!(
                "AND (title ILIKE ${idx} ESCAPE '\\' OR description ILIKE ${idx} ESCAPE '\\') ",
                idx = param_idx
            ));
            param_idx += 1;
        }

        query.push_str(&format!(
            "ORDER BY created_at_utc DESC LIMIT ${} OFFSET ${}",
            param_idx,
            param_idx + 1
        ));

        let mut q = sqlx::query(&query).bind(user_id);
        if let Some(status) = req.status {
            q = q.bind(status.as_str());
        }
        if let Some(category_id) = req.category_id {
            q = q.bind(category_id);
        }
        if let Some(search) = &req.search {
            q = q.bind(format!("%{}%", escape_like(search)));
        }
        q = q
            .bind(req.limit.unwrap_or(defaults::PAGE_LIMIT))
            .bind(req.offset.unwrap_or(defaults::PAGE_OFFSET));

        let rows = q.fetch_all(&self.pool).await.map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_task).collect())
    }

    async fn update(&self, id: Uuid, req: UpdateTaskRequest) -> Result<Task> {
        let row = sqlx::query(&format!(
            "UPDATE task
             SET title = COALESCE($1, title),
                 description = COALESCE($2, description),
                 priority = COALESCE($3, priority),
                 status = COALESCE($4, status),
                 category_id = COALESCE($5, category_id),
                 due_date = COALESCE($6, due_date),
                 updated_at_utc = $7
             WHERE id = $8
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(req.title)
        .bind(req.description)
        .bind(req.priority)
        .bind(req.status.map(|s| s.as_str()))
        .bind(req.category_id)
        .bind(req.due_date)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(map_row_to_task).ok_or(Error::TaskNotFound(id))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM task WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::TaskNotFound(id));
        }
        Ok(())
    }

    async fn toggle_status(&self, id: Uuid) -> Result<Task> {
        // Completed tasks reopen; anything else completes.
        let row = sqlx::query(&format!(
            "UPDATE task
             SET status = CASE WHEN status = 'completed' THEN 'pending' ELSE 'completed' END,
                 updated_at_utc = $1
             WHERE id = $2
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(map_row_to_task).ok_or(Error::TaskNotFound(id))
    }

    async fn stats(&self, user_id: Uuid) -> Result<TaskStats> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                    COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                    COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                    COUNT(*) FILTER (WHERE due_date < now()
                                     AND status IN ('pending', 'in_progress')) AS overdue
             FROM task WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(TaskStats {
            total: row.get("total"),
            pending: row.get("pending"),
            in_progress: row.get("in_progress"),
            completed: row.get("completed"),
            overdue: row.get("overdue"),
        })
    }
}
