//! Check command implementation

use anyhow::Result;
use serde::Serialize;
use sp_sql::{classify, StatementClass};
use sp_verify::{AttemptChecker, ComparisonOutcome};

use crate::cli::{CheckArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{print_attempt, read_query, ExitCode, EXIT_INCORRECT};
use crate::context::RuntimeContext;

/// Attempt summary for JSON output
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    question_id: u32,
    correct: bool,
    outcome: Option<&'a ComparisonOutcome>,
    error: Option<String>,
    rows: Option<usize>,
    duration_ms: u128,
}

/// Execute the check command
pub async fn execute(args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let sql = read_query(args.query.as_deref(), args.file.as_deref())?;
    let ctx = RuntimeContext::new(global, None).await?;
    let question = ctx.project.questions.require(args.id)?;

    if classify(&sql) == StatementClass::Mutating {
        eprintln!("Note: this statement modifies data; its changes are rolled back.");
    }

    let checker = AttemptChecker::new(ctx.db.as_ref());
    let attempt = checker.check(question, &sql).await?;

    match args.output {
        OutputFormat::Json => {
            let output = CheckOutput {
                question_id: attempt.question_id,
                correct: attempt.is_correct(),
                outcome: attempt.outcome(),
                error: attempt.error().map(|e| e.to_string()),
                rows: attempt.actual.as_ref().map(|r| r.row_count()),
                duration_ms: attempt.duration.as_millis(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            let expected = match attempt.outcome() {
                Some(outcome) if !outcome.is_equivalent() => {
                    Some(checker.reference(question).await?)
                }
                _ => None,
            };
            print_attempt(
                &attempt,
                expected.as_deref(),
                ctx.project.config.display.max_rows,
            );
        }
    }

    if !attempt.is_correct() {
        return Err(ExitCode(EXIT_INCORRECT).into());
    }
    Ok(())
}
