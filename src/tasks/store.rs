// SPDX-License-Identifier: MIT
//! Task persistence over the shared SQLite pool.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::{now_rfc3339, rfc3339_after, TaskDraft, TaskListParams, TaskRow};

/// Default timeout for individual SQLite queries (same guard as storage/mod.rs).
const QUERY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Execute a future with the standard query timeout.
async fn with_timeout<T>(
    fut: impl std::future::Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(QUERY_TIMEOUT.as_secs())),
    }
}

// ─── Errors ───────────────────────────────────────────────────────────────────

/// Typed store failures, so the API layer can pick status codes:
/// `NotFound` → 404, `Constraint` → 400, everything else → 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task not found")]
    NotFound,
    /// A row rejected at the storage boundary (CHECK / NOT NULL / UNIQUE).
    /// Surfaced as a request-level failure, never a crash.
    #[error("constraint violated: {0}")]
    Constraint(String),
    #[error("database query timed out after {0}s")]
    Timeout(u64),
    #[error(transparent)]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;
        if let Some(db) = e.as_database_error() {
            match db.kind() {
                ErrorKind::CheckViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::UniqueViolation => {
                    return StoreError::Constraint(db.message().to_string());
                }
                _ => {}
            }
        }
        StoreError::Db(e)
    }
}

// ─── TaskStore ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All tasks newest-first (`created_at` DESC, insertion order on ties),
    /// narrowed by whatever filters are set in `params`.
    pub async fn list(&self, params: &TaskListParams) -> Result<Vec<TaskRow>, StoreError> {
        let pool = self.pool.clone();
        let mut rows: Vec<TaskRow> = with_timeout(async {
            Ok(
                sqlx::query_as("SELECT * FROM tasks ORDER BY created_at DESC, rowid DESC")
                    .fetch_all(&pool)
                    .await?,
            )
        })
        .await?;

        // Post-filter (SQLite has limited dynamic WHERE support without a query builder)
        if let Some(completed) = params.completed {
            rows.retain(|r| r.completed == completed);
        }
        if let Some(ref search) = params.search {
            let q = search.to_lowercase();
            rows.retain(|r| {
                r.title.to_lowercase().contains(&q)
                    || r.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&q))
            });
        }
        if let Some(ref after) = params.created_after {
            rows.retain(|r| r.created_at.get(..10) >= Some(after.as_str()));
        }
        if let Some(ref before) = params.created_before {
            rows.retain(|r| r.created_at.get(..10) <= Some(before.as_str()));
        }
        if let Some(ref after) = params.updated_after {
            rows.retain(|r| r.updated_at.get(..10) >= Some(after.as_str()));
        }
        if let Some(ref before) = params.updated_before {
            rows.retain(|r| r.updated_at.get(..10) <= Some(before.as_str()));
        }

        Ok(rows)
    }

    pub async fn get(&self, id: &str) -> Result<Option<TaskRow>, StoreError> {
        Ok(sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Insert a new task. The store assigns the id and both timestamps;
    /// `created_at == updated_at` on the fresh row.
    pub async fn create(&self, draft: &TaskDraft) -> Result<TaskRow, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = now_rfc3339();
        sqlx::query(
            "INSERT INTO tasks (id, title, description, completed, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.completed)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(&id)
            .await?
            .ok_or(StoreError::Db(sqlx::Error::RowNotFound))
    }

    /// Full replacement of the mutable fields. `created_at` is never touched;
    /// `updated_at` moves strictly forward.
    pub async fn update(&self, id: &str, draft: &TaskDraft) -> Result<TaskRow, StoreError> {
        let Some(prev) = self.get(id).await? else {
            return Err(StoreError::NotFound);
        };
        let updated_at = rfc3339_after(&prev.updated_at);
        let result = sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, completed = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.completed)
        .bind(&updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.get(id).await?.ok_or(StoreError::NotFound)
    }

    /// Hard delete. No tombstone.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
