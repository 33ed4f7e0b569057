//! Schema command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use sp_db::{ColumnInfo, Database};

use crate::cli::{GlobalArgs, OutputFormat, SchemaArgs};
use crate::commands::common::rule;
use crate::context::RuntimeContext;

/// Table description for JSON output
#[derive(Debug, Serialize)]
struct TableInfo {
    name: String,
    rows: usize,
    columns: Vec<ColumnOutput>,
}

#[derive(Debug, Serialize)]
struct ColumnOutput {
    name: String,
    data_type: String,
    nullable: bool,
    default: Option<String>,
}

impl From<ColumnInfo> for ColumnOutput {
    fn from(c: ColumnInfo) -> Self {
        Self {
            name: c.name,
            data_type: c.data_type,
            nullable: c.nullable,
            default: c.default,
        }
    }
}

/// Execute the schema command
pub async fn execute(args: &SchemaArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global, None).await?;
    let filter: Option<Vec<String>> = args.tables.as_ref().map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    });

    match args.output {
        OutputFormat::Text => print_schema(ctx.db.as_ref(), filter.as_deref()).await,
        OutputFormat::Json => {
            let tables = collect(ctx.db.as_ref(), filter.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&tables)?);
            Ok(())
        }
    }
}

async fn collect(db: &dyn Database, filter: Option<&[String]>) -> Result<Vec<TableInfo>> {
    let mut tables = Vec::new();
    for name in table_names(db, filter).await? {
        let columns = db
            .describe_table(&name)
            .await
            .with_context(|| format!("Failed to describe table '{}'", name))?;
        let rows = db.row_count(&name).await?;
        tables.push(TableInfo {
            name,
            rows,
            columns: columns.into_iter().map(ColumnOutput::from).collect(),
        });
    }
    Ok(tables)
}

async fn table_names(db: &dyn Database, filter: Option<&[String]>) -> Result<Vec<String>> {
    let tables = db.list_tables().await.context("Failed to list tables")?;
    match filter {
        None => Ok(tables),
        Some(wanted) => {
            for name in wanted {
                if !tables.iter().any(|t| t.eq_ignore_ascii_case(name)) {
                    anyhow::bail!("Unknown table '{}'", name);
                }
            }
            Ok(tables
                .into_iter()
                .filter(|t| wanted.iter().any(|w| w.eq_ignore_ascii_case(t)))
                .collect())
        }
    }
}

/// Print columns for each table followed by row counts
pub(crate) async fn print_schema(db: &dyn Database, filter: Option<&[String]>) -> Result<()> {
    let tables = collect(db, filter).await?;

    println!("{}", rule('='));
    println!("DATABASE SCHEMA");
    println!("{}", rule('='));

    for table in &tables {
        println!("\nTable: {}", table.name);
        println!("{}", rule('-'));
        for col in &table.columns {
            let null_str = if col.nullable { "NULL" } else { "NOT NULL" };
            let default_str = col
                .default
                .as_ref()
                .map(|d| format!(" DEFAULT {}", d))
                .unwrap_or_default();
            println!(
                "  {:25} {:20} {}{}",
                col.name, col.data_type, null_str, default_str
            );
        }
    }

    println!("\n{}", rule('='));
    println!("TABLE ROW COUNTS");
    println!("{}", rule('='));
    for table in &tables {
        println!("  {:30} {:>10} rows", table.name, table.rows);
    }
    println!("{}", rule('='));
    Ok(())
}
