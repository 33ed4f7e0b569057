//! Sandbox command implementation
//!
//! Free-form queries against the practice data. Every statement runs in a
//! transaction that is rolled back, so the data is never changed.

use anyhow::Result;
use sp_db::{Database, ResultSet};
use sp_sql::{classify, StatementClass};

use crate::cli::{GlobalArgs, OutputFormat, SandboxArgs};
use crate::commands::common::{format_table, plural_rows, rule, ExitCode};
use crate::commands::prompt::{read_block, Input, Keyword};
use crate::commands::schema;
use crate::context::RuntimeContext;

const ACCEPTED: &[Keyword] = &[Keyword::Schema, Keyword::Quit];

/// Execute the sandbox command
pub async fn execute(args: &SandboxArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global, None).await?;
    let max_rows = ctx.project.config.display.max_rows;

    if let Some(sql) = &args.query {
        return run_once(ctx.db.as_ref(), sql, args.output, max_rows).await;
    }

    println!("{}", rule('='));
    println!("SQL SANDBOX - Free Query Mode");
    println!("{}", rule('='));
    println!("Execute any SQL query against the practice data.");
    println!("End each query with 'END' on a line of its own.");
    println!("Type 'SCHEMA' to view the tables, 'QUIT' to leave.");
    println!("{}", rule('='));

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    loop {
        println!("\nsql>");
        match read_block(&mut input, ACCEPTED)? {
            Input::Eof | Input::Command(Keyword::Quit) => break,
            Input::Command(Keyword::Schema) => {
                schema::print_schema(ctx.db.as_ref(), None).await?;
            }
            Input::Command(_) => {}
            Input::Query(sql) if sql.is_empty() => println!("No query entered."),
            Input::Query(sql) => match ctx.db.query(&sql).await {
                Ok(result) => print_result(&sql, &result, max_rows),
                Err(e) => println!("✗ Query error: {}", e),
            },
        }
    }
    Ok(())
}

async fn run_once(
    db: &dyn Database,
    sql: &str,
    output: OutputFormat,
    max_rows: usize,
) -> Result<()> {
    let result = match db.query(sql).await {
        Ok(result) => result,
        Err(e) if e.is_query_error() => {
            eprintln!("✗ Query error: {}", e);
            return Err(ExitCode(1).into());
        }
        Err(e) => return Err(e.into()),
    };

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_result(sql, &result, max_rows),
    }
    Ok(())
}

fn print_result(sql: &str, result: &ResultSet, max_rows: usize) {
    if classify(sql) == StatementClass::Mutating {
        println!("Note: changes made by this statement were rolled back.");
    }
    if result.columns.is_empty() {
        println!("Query executed successfully (no results returned)");
        return;
    }
    println!("Results ({}):", plural_rows(result.row_count()));
    println!("{}", format_table(result, max_rows));
}
