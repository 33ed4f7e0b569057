//! Consistency checks over a question set

use crate::verifier::{compare_names, Mismatch};
use serde::Serialize;
use sp_core::{Difficulty, Question};
use sp_db::Database;
use sp_sql::SqlParser;
use std::fmt;
use std::time::{Duration, Instant};

/// A problem found with one question
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// The reference solution does not execute
    SolutionFailed { message: String },

    /// `expected_columns` names a different set than the solution returns
    ColumnsDisagree {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// Several rows and no outer `ORDER BY`, so row order is up to the engine
    Unordered { rows: usize },

    /// More than one statement; only the last one's result is compared
    MultipleStatements { count: usize },
}

impl Finding {
    /// Errors make a question unusable; the rest are warnings
    pub fn is_error(&self) -> bool {
        !matches!(
            self,
            Finding::Unordered { .. } | Finding::MultipleStatements { .. }
        )
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::SolutionFailed { message } => write!(f, "solution failed: {}", message),
            Finding::ColumnsDisagree {
                missing,
                unexpected,
            } => write!(
                f,
                "expected_columns disagree with solution (not produced: [{}], not listed: [{}])",
                missing.join(", "),
                unexpected.join(", ")
            ),
            Finding::Unordered { rows } => write!(
                f,
                "solution returns {} rows without ORDER BY; answers are compared in row order",
                rows
            ),
            Finding::MultipleStatements { count } => write!(
                f,
                "solution has {} statements; only the last one's result is compared",
                count
            ),
        }
    }
}

/// Validation result for one question
#[derive(Debug, Clone, Serialize)]
pub struct QuestionReport {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,

    /// Rows the reference solution returned, when it ran
    pub rows: Option<usize>,

    pub findings: Vec<Finding>,

    #[serde(skip)]
    pub duration: Duration,
}

impl QuestionReport {
    /// No error findings (warnings allowed)
    pub fn is_ok(&self) -> bool {
        !self.findings.iter().any(Finding::is_error)
    }
}

/// Validation results for a question set
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub questions: Vec<QuestionReport>,
}

impl ValidationReport {
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn failed(&self) -> usize {
        self.questions.iter().filter(|q| !q.is_ok()).count()
    }

    pub fn warnings(&self) -> usize {
        self.questions
            .iter()
            .flat_map(|q| &q.findings)
            .filter(|f| !f.is_error())
            .count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Run every reference solution and check it against its question
pub async fn validate_questions(db: &dyn Database, questions: &[Question]) -> ValidationReport {
    let mut reports = Vec::with_capacity(questions.len());
    for question in questions {
        reports.push(validate_question(db, question).await);
    }
    ValidationReport { questions: reports }
}

async fn validate_question(db: &dyn Database, question: &Question) -> QuestionReport {
    let start = Instant::now();
    let mut findings = Vec::new();

    if let Ok(count) = SqlParser::new().statement_count(&question.solution) {
        if count > 1 {
            findings.push(Finding::MultipleStatements { count });
        }
    }

    let rows = match db.query(&question.solution).await {
        Ok(result) => {
            if let Some(expected) = &question.expected_columns {
                if let Some(Mismatch::ColumnNames {
                    missing,
                    unexpected,
                }) = compare_names(&result.columns, expected)
                {
                    findings.push(Finding::ColumnsDisagree {
                        missing,
                        unexpected,
                    });
                }
            }
            if result.row_count() > 1 && !sp_sql::has_order_by(&question.solution) {
                findings.push(Finding::Unordered {
                    rows: result.row_count(),
                });
            }
            Some(result.row_count())
        }
        Err(e) => {
            findings.push(Finding::SolutionFailed {
                message: e.to_string(),
            });
            None
        }
    };

    QuestionReport {
        id: question.id,
        title: question.title.clone(),
        difficulty: question.difficulty,
        rows,
        findings,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
