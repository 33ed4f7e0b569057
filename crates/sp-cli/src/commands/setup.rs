//! Setup command implementation

use anyhow::{Context, Result};
use sp_db::Database;

use crate::cli::{GlobalArgs, SetupArgs};
use crate::context::{load_project, open_database, resolve_db_path};

/// Execute the setup command
pub async fn execute(args: &SetupArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global, None)?;

    if project.config.database.is_in_memory() {
        anyhow::bail!(
            "The configured database is in-memory and is rebuilt on every run. \
             Pass --database <file> or set database.path to create a persistent one."
        );
    }

    let script = match &args.script {
        Some(path) => path.clone(),
        None => project.setup_script(),
    };
    let db = open_database(&project)?;

    println!("Setting up {}", resolve_db_path(&project));
    println!(
        "Applying {} (existing practice tables are recreated)",
        script.display()
    );
    db.setup(&script).await.context("Database setup failed")?;

    for table in db.list_tables().await? {
        println!("  ✓ {} ({} rows)", table, db.row_count(&table).await?);
    }
    println!("\nDatabase setup completed successfully!");
    Ok(())
}
