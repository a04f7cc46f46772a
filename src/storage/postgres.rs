//! Networked PostgreSQL store behind a bounded connection pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::OnceCell;

use super::{now_timestamp, StorageError, SubmissionStore};
use crate::domain::{Submission, SubmissionInput};

/// Pool floor: keep one connection warm.
const POOL_MIN_CONNECTIONS: u32 = 1;
/// Pool ceiling: this is a low-volume lead form.
const POOL_MAX_CONNECTIONS: u32 = 5;
/// How long to wait for a pooled connection before giving up.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS submissions (\
     id SERIAL PRIMARY KEY, \
     timestamp TEXT NOT NULL, \
     company_name TEXT NOT NULL, \
     role TEXT NOT NULL, \
     email TEXT NOT NULL, \
     website TEXT, \
     task_description TEXT NOT NULL, \
     timeline TEXT NOT NULL, \
     budget TEXT NOT NULL)";

const INSERT_ROW: &str = "INSERT INTO submissions \
     (timestamp, company_name, role, email, website, task_description, timeline, budget) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id";

const LIST_ALL: &str = "SELECT id, timestamp, company_name, role, email, website, \
     task_description, timeline, budget \
     FROM submissions ORDER BY timestamp DESC, id DESC";

/// PostgreSQL-backed submission store.
///
/// The pool is built lazily on first use so a backend that was reachable
/// at probe time but flaky afterwards surfaces as
/// [`StorageError::Unavailable`] rather than a startup failure. Pooled
/// handles return to the pool on drop, on every exit path.
#[derive(Debug)]
pub struct PostgresStore {
    url: String,
    pool: OnceCell<PgPool>,
}

impl PostgresStore {
    /// Creates a store for the given connection URL. No I/O happens here.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            pool: OnceCell::new(),
        }
    }

    /// Returns the pool, building it on first call.
    async fn pool(&self) -> Result<&PgPool, StorageError> {
        self.pool
            .get_or_try_init(|| async {
                PgPoolOptions::new()
                    .min_connections(POOL_MIN_CONNECTIONS)
                    .max_connections(POOL_MAX_CONNECTIONS)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect(&self.url)
                    .await
            })
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl SubmissionStore for PostgresStore {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        let pool = self.pool().await?;
        let mut conn = pool.acquire().await.map_err(StorageError::from_sqlx)?;
        sqlx::query(CREATE_TABLE)
            .execute(&mut *conn)
            .await
            .map_err(StorageError::from_sqlx)?;
        Ok(())
    }

    async fn insert(&self, input: &SubmissionInput) -> Result<i64, StorageError> {
        self.ensure_schema().await?;
        let pool = self.pool().await?;
        let mut conn = pool.acquire().await.map_err(StorageError::from_sqlx)?;
        let timestamp = now_timestamp();
        let id = sqlx::query_scalar::<_, i32>(INSERT_ROW)
            .bind(&timestamp)
            .bind(&input.company_name)
            .bind(&input.role)
            .bind(&input.email)
            .bind(&input.website)
            .bind(&input.task_description)
            .bind(&input.timeline)
            .bind(&input.budget)
            .fetch_one(&mut *conn)
            .await
            .map_err(StorageError::from_sqlx)?;
        Ok(i64::from(id))
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StorageError> {
        self.ensure_schema().await?;
        let pool = self.pool().await?;
        let mut conn = pool.acquire().await.map_err(StorageError::from_sqlx)?;
        let rows = sqlx::query_as::<
            _,
            (
                i32,
                String,
                String,
                String,
                String,
                Option<String>,
                String,
                String,
                String,
            ),
        >(LIST_ALL)
        .fetch_all(&mut *conn)
        .await
        .map_err(StorageError::from_sqlx)?;

        Ok(rows
            .into_iter()
            .map(
                |(
                    id,
                    timestamp,
                    company_name,
                    role,
                    email,
                    website,
                    task_description,
                    timeline,
                    budget,
                )| Submission {
                    id: i64::from(id),
                    timestamp,
                    company_name,
                    role,
                    email,
                    website,
                    task_description,
                    timeline,
                    budget,
                },
            )
            .collect())
    }
}
