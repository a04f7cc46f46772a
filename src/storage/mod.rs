//! Storage layer: dual-backend submission persistence.
//!
//! [`SubmissionStore`] is the capability contract; [`PostgresStore`]
//! (networked, pooled) and [`SqliteStore`] (embedded, one handle per
//! operation) implement it with their own SQL dialects. The
//! [`StorageManager`] probes PostgreSQL once at startup, owns the active
//! backend for the process lifetime, and performs a one-way downgrade to
//! SQLite when the pool becomes unavailable.

pub mod manager;
pub mod postgres;
pub mod sqlite;

pub use manager::StorageManager;
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::domain::{Submission, SubmissionInput};

/// Which backend currently serves store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Client/server PostgreSQL reached through a connection pool.
    Networked,
    /// Local file-based SQLite store, no server process.
    Embedded,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Networked => f.write_str("postgres"),
            Self::Embedded => f.write_str("sqlite"),
        }
    }
}

/// Persistence failure, split by whether the backend could be reached.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The connection or pool could not be obtained. Triggers the
    /// manager's downgrade to the embedded backend.
    #[error("connection unavailable: {0}")]
    Unavailable(String),

    /// The backend was reached but the operation failed.
    #[error("{0}")]
    Query(String),
}

impl StorageError {
    /// Classifies an sqlx error: pool and connection-level failures are
    /// [`StorageError::Unavailable`], everything else is a query failure.
    #[must_use]
    pub fn from_sqlx(error: sqlx::Error) -> Self {
        let unavailable = matches!(
            error,
            sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::Configuration(_)
        );
        if unavailable {
            Self::Unavailable(error.to_string())
        } else {
            Self::Query(error.to_string())
        }
    }

    /// Whether this error should trigger the embedded-backend downgrade.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Contract every submission backend fulfils.
///
/// Implementations call [`SubmissionStore::ensure_schema`] at the top of
/// every other operation; the check is intentional cold-start defensiveness,
/// not a performance concern at this volume.
#[async_trait]
pub trait SubmissionStore: Send + Sync + std::fmt::Debug {
    /// Creates the `submissions` relation if absent. Idempotent; safe to
    /// call before every operation.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] on connection or DDL failure.
    async fn ensure_schema(&self) -> Result<(), StorageError>;

    /// Inserts one submission, stamping it with the server-local time,
    /// and returns the backend-assigned id. Each insert auto-commits as
    /// its own transaction.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] on any underlying write failure.
    async fn insert(&self, input: &SubmissionInput) -> Result<i64, StorageError>;

    /// Returns all submissions ordered by timestamp descending, with the
    /// row id breaking sub-second ties. An empty store yields an empty
    /// vector.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] on any underlying read failure.
    async fn list_all(&self) -> Result<Vec<Submission>, StorageError>;
}

/// Insertion timestamp: server-local time, `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_expected_shape() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(ts.as_bytes().get(4), Some(&b'-'));
        assert_eq!(ts.as_bytes().get(10), Some(&b' '));
        assert_eq!(ts.as_bytes().get(13), Some(&b':'));
    }

    #[test]
    fn pool_errors_classify_as_unavailable() {
        assert!(StorageError::from_sqlx(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(StorageError::from_sqlx(sqlx::Error::PoolClosed).is_unavailable());
        assert!(!StorageError::from_sqlx(sqlx::Error::RowNotFound).is_unavailable());
    }

    #[test]
    fn backend_kind_display() {
        assert_eq!(BackendKind::Networked.to_string(), "postgres");
        assert_eq!(BackendKind::Embedded.to_string(), "sqlite");
    }
}
