//! Grading a submitted query against a question

use crate::error::{CheckError, CheckResult};
use crate::verifier::{verify, ComparisonOutcome};
use sp_core::Question;
use sp_db::{Database, DbError, ResultSet};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Result of one submitted query
#[derive(Debug)]
pub struct Attempt {
    /// Question the query was submitted for
    pub question_id: u32,

    /// Comparison outcome, or the error that stopped the query from running
    pub result: Result<ComparisonOutcome, DbError>,

    /// Rows the query produced, when it ran
    pub actual: Option<ResultSet>,

    /// Time spent executing the submitted query
    pub duration: Duration,
}

impl Attempt {
    /// Whether the query ran and matched the reference result
    pub fn is_correct(&self) -> bool {
        matches!(&self.result, Ok(outcome) if outcome.is_equivalent())
    }

    pub fn outcome(&self) -> Option<&ComparisonOutcome> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&DbError> {
        self.result.as_ref().err()
    }
}

/// Executes submissions and compares them with cached reference results
pub struct AttemptChecker<'a> {
    db: &'a dyn Database,
    cache: Mutex<HashMap<u32, Arc<ResultSet>>>,
}

impl<'a> AttemptChecker<'a> {
    /// Create a new checker
    pub fn new(db: &'a dyn Database) -> Self {
        Self {
            db,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Reference result for `question`, executing its solution on first use
    pub async fn reference(&self, question: &Question) -> CheckResult<Arc<ResultSet>> {
        if let Some(cached) = self.cached(question.id)? {
            return Ok(cached);
        }

        log::debug!("Computing reference result for question {}", question.id);
        let result = self
            .db
            .query(&question.solution)
            .await
            .map_err(|source| CheckError::Reference {
                id: question.id,
                source,
            })?;

        let result = Arc::new(result);
        self.cache
            .lock()
            .map_err(|e| CheckError::CachePoisoned(e.to_string()))?
            .insert(question.id, Arc::clone(&result));
        Ok(result)
    }

    fn cached(&self, id: u32) -> CheckResult<Option<Arc<ResultSet>>> {
        let cache = self
            .cache
            .lock()
            .map_err(|e| CheckError::CachePoisoned(e.to_string()))?;
        Ok(cache.get(&id).cloned())
    }

    /// Run `sql` and grade it against `question`.
    ///
    /// A query that fails to execute is recorded in the attempt and the
    /// reference solution is not consulted.
    pub async fn check(&self, question: &Question, sql: &str) -> CheckResult<Attempt> {
        let start = Instant::now();
        let executed = self.db.query(sql).await;
        let duration = start.elapsed();

        let actual = match executed {
            Ok(actual) => actual,
            Err(e) => {
                log::debug!("Submission for question {} failed: {}", question.id, e);
                return Ok(Attempt {
                    question_id: question.id,
                    result: Err(e),
                    actual: None,
                    duration,
                });
            }
        };

        let expected = self.reference(question).await?;
        let outcome = verify(&actual, &expected, question.expected_columns.as_deref());

        Ok(Attempt {
            question_id: question.id,
            result: Ok(outcome),
            actual: Some(actual),
            duration,
        })
    }
}

#[cfg(test)]
#[path = "checker_test.rs"]
mod tests;
