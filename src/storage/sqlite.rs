//! Embedded SQLite store: a fresh file-backed handle per operation.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;

use super::{now_timestamp, StorageError, SubmissionStore};
use crate::domain::{Submission, SubmissionInput};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS submissions (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
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
     VALUES (?, ?, ?, ?, ?, ?, ?, ?)";

const LIST_ALL: &str = "SELECT id, timestamp, company_name, role, email, website, \
     task_description, timeline, budget \
     FROM submissions ORDER BY timestamp DESC, id DESC";

/// SQLite-backed submission store.
///
/// Every operation opens its own connection and closes it on completion,
/// so no shared handle or explicit lock exists; concurrent callers get
/// SQLite's native writer serialization.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Creates a store over the given database file. The file and its
    /// schema are created lazily on first operation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens a fresh connection to the database file.
    async fn open(&self) -> Result<SqliteConnection, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true);
        SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl SubmissionStore for SqliteStore {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        let mut conn = self.open().await?;
        let result = sqlx::query(CREATE_TABLE)
            .execute(&mut conn)
            .await
            .map_err(StorageError::from_sqlx);
        let _ = conn.close().await;
        result.map(|_| ())
    }

    async fn insert(&self, input: &SubmissionInput) -> Result<i64, StorageError> {
        self.ensure_schema().await?;
        let mut conn = self.open().await?;
        let timestamp = now_timestamp();
        let result = sqlx::query(INSERT_ROW)
            .bind(&timestamp)
            .bind(&input.company_name)
            .bind(&input.role)
            .bind(&input.email)
            .bind(&input.website)
            .bind(&input.task_description)
            .bind(&input.timeline)
            .bind(&input.budget)
            .execute(&mut conn)
            .await
            .map_err(StorageError::from_sqlx);
        let _ = conn.close().await;
        Ok(result?.last_insert_rowid())
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StorageError> {
        self.ensure_schema().await?;
        let mut conn = self.open().await?;
        let rows = sqlx::query_as::<
            _,
            (
                i64,
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
        .fetch_all(&mut conn)
        .await
        .map_err(StorageError::from_sqlx);
        let _ = conn.close().await;

        Ok(rows?
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
                    id,
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
