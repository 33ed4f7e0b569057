//! sp-verify - Answer checking for sqlprep
//!
//! `verify` compares two result sets. `AttemptChecker` runs submissions and
//! reference solutions through a [`sp_db::Database`] and grades them, and
//! `validate_questions` checks a question set against the practice data.

pub mod checker;
pub mod error;
pub mod validate;
pub mod verifier;

pub use checker::{Attempt, AttemptChecker};
pub use error::{CheckError, CheckResult};
pub use validate::{validate_questions, Finding, QuestionReport, ValidationReport};
pub use verifier::{verify, ComparisonOutcome, Mismatch};
