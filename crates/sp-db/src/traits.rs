//! Database trait definition

use crate::error::{DbError, DbResult};
use crate::result::ResultSet;
use async_trait::async_trait;
use std::path::Path;

/// Column metadata reported by schema introspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,

    /// Engine type name (e.g. `INTEGER`, `VARCHAR`, `DECIMAL(10,2)`)
    pub data_type: String,

    /// Whether NULL is allowed
    pub nullable: bool,

    /// Default expression, if any
    pub default: Option<String>,
}

/// Query executor for the practice database
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run one statement and return its rows.
    ///
    /// Any changes the statement makes are discarded. Fails with
    /// [`DbError::ExecutionError`] for bad SQL and [`DbError::Timeout`] when
    /// the statement outlives the configured limit.
    async fn query(&self, sql: &str) -> DbResult<ResultSet>;

    /// Execute multiple SQL statements and keep their effects
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Base tables in the default schema, sorted by name
    async fn list_tables(&self) -> DbResult<Vec<String>>;

    /// Columns of `table` in ordinal order
    async fn describe_table(&self, table: &str) -> DbResult<Vec<ColumnInfo>>;

    /// Number of rows in `table`
    async fn row_count(&self, table: &str) -> DbResult<usize>;

    /// Engine version string
    async fn version(&self) -> DbResult<String>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Read a SQL script from disk and execute it
    async fn run_script(&self, path: &Path) -> DbResult<()> {
        let sql = std::fs::read_to_string(path).map_err(|e| DbError::ScriptError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.execute_batch(&sql)
            .await
            .map_err(|e| DbError::ScriptError {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }
}
