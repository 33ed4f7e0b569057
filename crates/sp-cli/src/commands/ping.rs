//! Ping command implementation

use anyhow::{Context, Result};
use sp_db::Database;

use crate::cli::GlobalArgs;
use crate::context::{load_project, open_database, resolve_db_path};

/// Execute the ping command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global, None)?;
    let db = open_database(&project)?;
    let version = db.version().await.context("Database connection failed")?;

    println!("Connected to: DuckDB {}", version);
    println!("Database: {}", resolve_db_path(&project));
    println!("Query time limit: {}s", db.timeout().as_secs());
    Ok(())
}
