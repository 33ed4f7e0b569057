//! Validate command implementation

use anyhow::Result;
use sp_verify::validate_questions;

use crate::cli::{GlobalArgs, OutputFormat, ValidateArgs};
use crate::commands::common::ExitCode;
use crate::context::RuntimeContext;

/// Execute the validate command
pub async fn execute(args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global, None).await?;
    let questions = ctx.project.questions.all();
    let report = validate_questions(ctx.db.as_ref(), questions).await;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("Validating {} questions...\n", report.total());
            for q in &report.questions {
                let mark = if q.is_ok() { "✓" } else { "✗" };
                let rows = q
                    .rows
                    .map(|n| format!(" ({} rows)", n))
                    .unwrap_or_default();
                println!(
                    "  {} #{} {}{} [{}ms]",
                    mark,
                    q.id,
                    q.title,
                    rows,
                    q.duration.as_millis()
                );
                for finding in &q.findings {
                    let level = if finding.is_error() { "error" } else { "warning" };
                    println!("      {}: {}", level, finding);
                }
            }
            println!();
            println!(
                "Passed: {}, Failed: {}, Warnings: {}",
                report.total() - report.failed(),
                report.failed(),
                report.warnings()
            );
        }
    }

    if !report.all_passed() || (args.strict && report.warnings() > 0) {
        return Err(ExitCode(1).into());
    }
    Ok(())
}
