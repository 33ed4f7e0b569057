use super::*;
use sp_db::{Database, DuckDbBackend};
use std::io::Cursor;

async fn practice_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE departments (id INTEGER, name VARCHAR);
         INSERT INTO departments VALUES (1, 'Engineering'), (2, 'Sales');",
    )
    .await
    .unwrap();
    db
}

fn question(id: u32, solution: &str) -> Question {
    Question {
        id,
        title: format!("Question {}", id),
        description: "Return the department names.".to_string(),
        hint: None,
        difficulty: Difficulty::Easy,
        topics: Vec::new(),
        solution: solution.to_string(),
        expected_columns: None,
    }
}

#[tokio::test]
async fn test_correct_answer_moves_on() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let q = question(1, "SELECT name FROM departments ORDER BY id");
    let mut stats = SessionStats::new();
    let mut input = Cursor::new("SELECT name\nFROM departments\nORDER BY id\nEND\n");

    let step = practice_question(&checker, &q, &mut stats, &mut input, 20)
        .await
        .unwrap();

    assert!(matches!(step, Step::Next));
    let snapshot = stats.current_stats();
    assert_eq!(snapshot.attempted, 1);
    assert_eq!(snapshot.correct, 1);
}

#[tokio::test]
async fn test_retry_after_wrong_answer() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let q = question(1, "SELECT name FROM departments ORDER BY id");
    let mut stats = SessionStats::new();
    let mut input = Cursor::new(
        "SELECT name FROM departments ORDER BY id DESC\nEND\ny\n\
         SELECT name FROM departments ORDER BY id\nEND\n",
    );

    let step = practice_question(&checker, &q, &mut stats, &mut input, 20)
        .await
        .unwrap();

    assert!(matches!(step, Step::Next));
    let snapshot = stats.current_stats();
    assert_eq!(snapshot.attempted, 2);
    assert_eq!(snapshot.correct, 1);
}

#[tokio::test]
async fn test_quit_ends_session() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let q = question(1, "SELECT name FROM departments ORDER BY id");
    let mut stats = SessionStats::new();
    let mut input = Cursor::new("HINT\nQUIT\n");

    let step = practice_question(&checker, &q, &mut stats, &mut input, 20)
        .await
        .unwrap();

    assert!(matches!(step, Step::Quit));
    assert_eq!(stats.current_stats().attempted, 0);
}

#[tokio::test]
async fn test_broken_solution_ends_only_the_question() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let broken = question(7, "SELECT * FROM missing_table");
    let mut stats = SessionStats::new();
    let mut input = Cursor::new("SELECT 1\nEND\nn\n");

    let step = practice_question(&checker, &broken, &mut stats, &mut input, 20)
        .await
        .unwrap();

    assert!(matches!(step, Step::Next));
    // The user's query was never graded
    assert_eq!(stats.current_stats().attempted, 0);
}

#[tokio::test]
async fn test_broken_solution_on_request() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let broken = question(7, "SELECT * FROM missing_table");
    let mut stats = SessionStats::new();
    let mut input = Cursor::new("SOLUTION\n");

    let step = practice_question(&checker, &broken, &mut stats, &mut input, 20)
        .await
        .unwrap();
    assert!(matches!(step, Step::Next));
}

#[tokio::test]
async fn test_session_continues_past_broken_question() {
    let db = practice_db().await;
    let checker = AttemptChecker::new(&db);
    let questions = [
        question(7, "SELECT * FROM missing_table"),
        question(8, "SELECT COUNT(*) AS total FROM departments"),
    ];
    let mut stats = SessionStats::new();
    let mut input = Cursor::new(
        "SELECT 1\nEND\n\
         SELECT COUNT(*) AS total FROM departments\nEND\n",
    );

    for q in &questions {
        let step = practice_question(&checker, q, &mut stats, &mut input, 20)
            .await
            .unwrap();
        assert!(matches!(step, Step::Next));
    }

    let snapshot = stats.current_stats();
    assert_eq!(snapshot.attempted, 1);
    assert_eq!(snapshot.correct, 1);
}
