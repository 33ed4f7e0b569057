//! Error types for sp-db

use std::time::Duration;
use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// Statement exceeded its time limit (D004)
    #[error("[D004] Query exceeded the {}s time limit", .limit.as_secs_f64())]
    Timeout { limit: Duration },

    /// Setup script could not be read or applied (D005)
    #[error("[D005] Failed to apply script '{path}': {message}")]
    ScriptError { path: String, message: String },

    /// Mutex poisoned (D006)
    #[error("[D006] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Internal error (D007)
    #[error("[D007] Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Whether the statement ran but failed (bad SQL, missing table, timeout)
    /// as opposed to the database itself being unavailable
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            DbError::ExecutionError(_) | DbError::TableNotFound(_) | DbError::Timeout { .. }
        )
    }
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error has no structured variants for catalog errors,
        // so classification goes by message text.
        let msg = err.to_string();
        if msg.contains("Table with name")
            || msg.contains("View with name")
            || msg.contains("Table or view with name")
            || (msg.contains("Catalog Error") && msg.contains("Table") && msg.contains("not found"))
        {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
