use super::*;
use crate::verifier::Mismatch;
use sp_core::Difficulty;
use sp_db::{CellValue, DuckDbBackend};

async fn practice_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE employees (id INTEGER, first_name VARCHAR, salary DECIMAL(10,2));
         INSERT INTO employees VALUES
            (1, 'Alice', 95000), (2, 'Bob', 85000), (3, 'Carol', 60000),
            (4, 'Kate', 88000), (5, 'Mia', 92000);",
    )
    .await
    .unwrap();
    db
}

fn question(solution: &str, expected_columns: Option<&[&str]>) -> Question {
    Question {
        id: 7,
        title: "High Earners".to_string(),
        description: "First names of employees earning more than 80000.".to_string(),
        hint: None,
        difficulty: Difficulty::Easy,
        topics: vec!["WHERE".to_string()],
        solution: solution.to_string(),
        expected_columns: expected_columns
            .map(|cols| cols.iter().map(|c| c.to_string()).collect()),
    }
}

const HIGH_EARNERS: &str =
    "SELECT first_name FROM employees WHERE salary > 80000 ORDER BY salary DESC";

#[tokio::test]
async fn test_correct_attempt() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let q = question(HIGH_EARNERS, None);

    let attempt = checker
        .check(
            &q,
            "select FIRST_NAME from employees where salary > 80000 order by salary desc",
        )
        .await
        .unwrap();

    assert!(attempt.is_correct());
    assert_eq!(attempt.question_id, 7);
    assert_eq!(attempt.actual.as_ref().unwrap().row_count(), 4);
}

#[tokio::test]
async fn test_wrong_order_is_incorrect() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let q = question(HIGH_EARNERS, None);

    let attempt = checker
        .check(
            &q,
            "SELECT first_name FROM employees WHERE salary > 80000 ORDER BY salary ASC",
        )
        .await
        .unwrap();

    assert!(!attempt.is_correct());
    assert_eq!(attempt.outcome().unwrap().reason(), Some("cell_value"));
}

#[tokio::test]
async fn test_wrong_filter_reports_row_count() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let q = question(HIGH_EARNERS, None);

    let attempt = checker
        .check(&q, "SELECT first_name FROM employees ORDER BY salary DESC")
        .await
        .unwrap();

    assert_eq!(
        attempt.outcome(),
        Some(&ComparisonOutcome::NotEquivalent(Mismatch::RowCount {
            actual: 5,
            expected: 4
        }))
    );
}

#[tokio::test]
async fn test_execution_error_skips_verification() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    // A broken reference would fail if it were consulted
    let q = question("SELECT nope FROM nowhere", None);

    let attempt = checker.check(&q, "selct * from employees").await.unwrap();

    assert!(!attempt.is_correct());
    assert!(attempt.outcome().is_none());
    assert!(matches!(attempt.error(), Some(DbError::ExecutionError(_))));
    assert!(attempt.actual.is_none());
}

#[tokio::test]
async fn test_broken_reference_is_an_error() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let q = question("SELECT nope FROM nowhere", None);

    let err = checker.check(&q, "SELECT 1").await.unwrap_err();
    assert!(matches!(err, CheckError::Reference { id: 7, .. }));
    assert!(err.to_string().starts_with("[V001]"));
}

#[tokio::test]
async fn test_reference_is_cached() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let q = question("SELECT COUNT(*) AS n FROM employees", None);

    let first = checker.reference(&q).await.unwrap();
    db.execute_batch("INSERT INTO employees VALUES (6, 'Zed', 1)")
        .await
        .unwrap();
    let second = checker.reference(&q).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.rows[0][0], CellValue::Int(5));
}

#[tokio::test]
async fn test_expected_columns_override() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let q = question(
        "SELECT COUNT(*) AS headcount FROM employees",
        Some(&["headcount"][..]),
    );

    let good = checker
        .check(&q, "SELECT COUNT(id) AS HeadCount FROM employees")
        .await
        .unwrap();
    assert!(good.is_correct());

    let unaliased = checker
        .check(&q, "SELECT COUNT(id) FROM employees")
        .await
        .unwrap();
    assert_eq!(unaliased.outcome().unwrap().reason(), Some("column_names"));
}

#[tokio::test]
async fn test_mutating_submission_leaves_data() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let q = question("SELECT COUNT(*) AS n FROM employees", None);

    let attempt = checker.check(&q, "DELETE FROM employees").await.unwrap();
    assert!(!attempt.is_correct());
    assert_eq!(db.row_count("employees").await.unwrap(), 5);
}
