//! Error types for sp-verify

use sp_db::DbError;
use thiserror::Error;

/// Errors raised while grading an attempt
#[derive(Error, Debug)]
pub enum CheckError {
    /// The stored solution itself could not be executed (V001)
    #[error("[V001] Reference solution for question {id} failed: {source}")]
    Reference {
        id: u32,
        #[source]
        source: DbError,
    },

    /// Reference cache lock poisoned (V002)
    #[error("[V002] Reference cache poisoned: {0}")]
    CachePoisoned(String),
}

/// Result type alias for CheckError
pub type CheckResult<T> = Result<T, CheckError>;
