//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use sp_core::{Question, StatsSnapshot};
use sp_db::ResultSet;
use sp_verify::{Attempt, ComparisonOutcome, Mismatch};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: ExitCode is a control-flow mechanism, not a
        // user-facing error.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Exit code for an attempt that ran but was not correct, or failed to run
pub(crate) const EXIT_INCORRECT: i32 = 2;

/// Width of section rules
const RULE_WIDTH: usize = 60;

pub(crate) fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// Render a result set as a bordered table, showing at most `max_rows` rows
pub(crate) fn format_table(result: &ResultSet, max_rows: usize) -> String {
    if result.is_empty() {
        return "No results returned".to_string();
    }

    let shown = &result.rows[..result.row_count().min(max_rows)];
    let cells: Vec<Vec<String>> = shown
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let separator = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let line = |values: &[String]| -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let value = values.get(i).map(String::as_str).unwrap_or("");
                format!(" {:<width$} ", value, width = w)
            })
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut out = vec![separator.clone(), line(&result.columns), separator.clone()];
    out.extend(cells.iter().map(|row| line(row)));
    out.push(separator);

    if result.row_count() > max_rows {
        out.push(format!(
            "\n... ({} more rows)",
            result.row_count() - max_rows
        ));
    }

    out.join("\n")
}

/// Row count suffix, e.g. "1 row" or "4 rows"
pub(crate) fn plural_rows(n: usize) -> String {
    if n == 1 {
        "1 row".to_string()
    } else {
        format!("{} rows", n)
    }
}

/// Resolve query text from `--query`, `--file`, or stdin
pub(crate) fn read_query(query: Option<&str>, file: Option<&Path>) -> Result<String> {
    let sql = match (query, file) {
        (Some(q), _) => q.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query file {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read query from stdin")?;
            buf
        }
    };

    let sql = sql.trim().to_string();
    if sql.is_empty() {
        anyhow::bail!("No query entered");
    }
    Ok(sql)
}

/// Print a question header, description, and optionally its hint
pub(crate) fn print_question(question: &Question, show_hint: bool) {
    println!("{}", rule('='));
    println!("Question #{}: {}", question.id, question.title);
    println!("{}", rule('='));
    println!("Difficulty: {}", question.difficulty.as_str().to_uppercase());
    if !question.topics.is_empty() {
        println!("Topics: {}", question.topics.join(", "));
    }
    println!("\n{}", question.description);

    if let Some(columns) = &question.expected_columns {
        println!("\nExpected columns: {}", columns.join(", "));
    }
    if show_hint {
        match &question.hint {
            Some(hint) => println!("\nHint: {}", hint),
            None => println!("\nNo hint for this question."),
        }
    }
}

/// Print a question's solution and, when given, its result
pub(crate) fn print_solution(question: &Question, result: Option<&ResultSet>, max_rows: usize) {
    println!("{}", rule('='));
    println!("SOLUTION");
    println!("{}", rule('='));
    println!("\n{}\n", question.solution.trim());
    if let Some(result) = result {
        println!("Expected results ({}):", plural_rows(result.row_count()));
        println!("{}", format_table(result, max_rows));
    }
}

/// Print the verdict for one attempt
pub(crate) fn print_attempt(attempt: &Attempt, expected: Option<&ResultSet>, max_rows: usize) {
    let outcome = match &attempt.result {
        Err(e) => {
            println!("✗ Query error: {}", e);
            return;
        }
        Ok(outcome) => outcome,
    };

    if let Some(actual) = &attempt.actual {
        println!(
            "Your results ({}) [{}ms]:",
            plural_rows(actual.row_count()),
            attempt.duration.as_millis()
        );
        println!("{}", format_table(actual, max_rows));
    }

    println!("\n{}", rule('='));
    match outcome {
        ComparisonOutcome::Equivalent => {
            println!("✓ CORRECT! Your query produces the expected results.");
        }
        ComparisonOutcome::NotEquivalent(mismatch) => {
            println!("✗ INCORRECT. {}", mismatch);
            if let Mismatch::CellValue {
                actual_row,
                expected_row,
                ..
            } = mismatch
            {
                println!("   Your row:     {}", join_row(actual_row));
                println!("   Expected row: {}", join_row(expected_row));
            }
            if let (Mismatch::RowCount { .. }, Some(expected)) = (mismatch, expected) {
                println!("\nExpected results:");
                println!("{}", format_table(expected, max_rows));
            }
        }
    }
    println!("{}", rule('='));
}

fn join_row(row: &[sp_db::CellValue]) -> String {
    row.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Print session statistics
pub(crate) fn print_stats(stats: &StatsSnapshot) {
    println!("{}", rule('='));
    println!("PRACTICE STATISTICS");
    println!("{}", rule('='));
    println!("Questions Attempted: {}", stats.attempted);
    println!("Correct: {}", stats.correct);
    println!("Incorrect: {}", stats.incorrect);
    if stats.attempted > 0 {
        println!("Accuracy: {:.1}%", stats.accuracy_percent());
    }
    println!("{}", rule('='));
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
