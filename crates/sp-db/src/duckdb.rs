//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::result::ResultSet;
use crate::traits::{ColumnInfo, Database};
use crate::value::CellValue;
use async_trait::async_trait;
use duckdb::types::Value;
use duckdb::{Connection, InterruptHandle};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// Default per-statement time limit
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// How long an interrupted statement gets to wind down
const CANCEL_GRACE: Duration = Duration::from_secs(2);

/// Interval between interrupt requests while waiting for a statement to stop
const CANCEL_POLL: Duration = Duration::from_millis(50);

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
    timeout: Duration,
    running: Arc<AtomicUsize>,
}

/// Counts one statement as running until dropped
struct RunningGuard(Arc<AtomicUsize>);

impl RunningGuard {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            timeout: DEFAULT_QUERY_TIMEOUT,
            running: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the per-statement time limit
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The per-statement time limit
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Statements currently executing on worker threads
    pub fn running_queries(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Apply the schema and seed script to this database
    pub async fn setup(&self, script: &Path) -> DbResult<()> {
        log::debug!("Applying setup script {}", script.display());
        self.run_script(script).await
    }

    fn lock(&self) -> DbResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Open a second connection to the same database
    fn clone_connection(&self) -> DbResult<Connection> {
        self.lock()?
            .try_clone()
            .map_err(|e| DbError::ConnectionError(e.to_string()))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn list_tables_sync(&self) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = 'main' AND table_type = 'BASE TABLE' \
             ORDER BY table_name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn describe_table_sync(&self, table: &str) -> DbResult<Vec<ColumnInfo>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT column_name, data_type, is_nullable, column_default \
             FROM information_schema.columns \
             WHERE table_schema = 'main' AND table_name = ? \
             ORDER BY ordinal_position",
        )?;
        let columns = stmt
            .query_map([table], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    data_type: row.get(1)?,
                    nullable: row.get::<_, String>(2)? == "YES",
                    default: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if columns.is_empty() {
            return Err(DbError::TableNotFound(table.to_string()));
        }
        Ok(columns)
    }

    fn row_count_sync(&self, table: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn version_sync(&self) -> DbResult<String> {
        let conn = self.lock()?;
        let version: String = conn.query_row("SELECT version()", [], |row| row.get(0))?;
        Ok(version)
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Run `sql` inside a transaction that is always rolled back
fn query_rolled_back(mut conn: Connection, sql: &str) -> DbResult<ResultSet> {
    let tx = conn.transaction()?;
    let result = read_result_set(&tx, sql);
    if let Err(e) = tx.rollback() {
        log::debug!("Rollback after query failed: {}", e);
    }
    result
}

/// Interrupt a timed-out statement until its worker reports back.
///
/// Returns `false` if the worker is still running after [`CANCEL_GRACE`].
/// The interrupt is repeated because one sent before execution starts is lost.
async fn interrupt_until_stopped(
    interrupt: &InterruptHandle,
    rx: &mut oneshot::Receiver<DbResult<ResultSet>>,
) -> bool {
    let deadline = Instant::now() + CANCEL_GRACE;
    loop {
        interrupt.interrupt();
        if tokio::time::timeout(CANCEL_POLL, &mut *rx).await.is_ok() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
    }
}

fn read_result_set(conn: &Connection, sql: &str) -> DbResult<ResultSet> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;

    // Column names are only known once the statement has run.
    let columns: Vec<String> = rows
        .as_ref()
        .map(|s| s.column_names().iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();

    let mut values = Vec::new();
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            let value: Value = row.get(idx)?;
            cells.push(CellValue::from(value));
        }
        values.push(cells);
    }

    Ok(ResultSet::new(columns, values))
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn query(&self, sql: &str) -> DbResult<ResultSet> {
        let conn = self.clone_connection()?;
        let interrupt = conn.interrupt_handle();
        let owned_sql = sql.to_string();
        let guard = RunningGuard::new(&self.running);
        let (tx, mut rx) = oneshot::channel();

        // A plain thread rather than spawn_blocking: the caller stops waiting
        // at the time limit and must not be tied to the blocking pool.
        std::thread::Builder::new()
            .name("sqlprep-query".to_string())
            .spawn(move || {
                let result = query_rolled_back(conn, &owned_sql);
                drop(guard);
                let _ = tx.send(result);
            })
            .map_err(|e| DbError::Internal(e.to_string()))?;

        let start = Instant::now();
        match tokio::time::timeout(self.timeout, &mut rx).await {
            Ok(Ok(result)) => {
                log::debug!(
                    "Query finished in {}ms: {}",
                    start.elapsed().as_millis(),
                    sql.trim()
                );
                result
            }
            Ok(Err(_)) => Err(DbError::Internal(
                "query thread exited without a result".to_string(),
            )),
            Err(_) => {
                if interrupt_until_stopped(&interrupt, &mut rx).await {
                    log::debug!("Interrupted query after {:?}: {}", self.timeout, sql.trim());
                } else {
                    log::warn!(
                        "Query exceeded {:?} and ignored the interrupt; {} statement(s) still running",
                        self.timeout,
                        self.running_queries()
                    );
                }
                Err(DbError::Timeout {
                    limit: self.timeout,
                })
            }
        }
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn list_tables(&self) -> DbResult<Vec<String>> {
        self.list_tables_sync()
    }

    async fn describe_table(&self, table: &str) -> DbResult<Vec<ColumnInfo>> {
        self.describe_table_sync(table)
    }

    async fn row_count(&self, table: &str) -> DbResult<usize> {
        self.row_count_sync(table)
    }

    async fn version(&self) -> DbResult<String> {
        self.version_sync()
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
