//! End-to-end tests that run the sqlprep binary

use std::process::{Command, Output};

const FIXTURE: &str = "tests/fixtures/sample_project";

fn sqlprep(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqlprep"))
        .arg("--project-dir")
        .arg(FIXTURE)
        .args(args)
        .env_remove("SQLPREP_DATABASE")
        .env_remove("SQLPREP_TIMEOUT_SECS")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_ls_json() {
    let output = sqlprep(&["ls", "--difficulty", "hard", "-o", "json"]);
    assert!(output.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<u64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![20, 21, 22]);
}

#[test]
fn test_ls_topic_filter() {
    let output = sqlprep(&["ls", "--topic", "having"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Average Salary by Department"));
    assert!(text.contains("1 questions"));
}

#[test]
fn test_check_correct_exits_zero() {
    let output = sqlprep(&[
        "check",
        "2",
        "--query",
        "SELECT first_name FROM employees WHERE salary > 80000 ORDER BY salary DESC",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("CORRECT"));
}

#[test]
fn test_check_incorrect_exits_two() {
    let output = sqlprep(&[
        "check",
        "2",
        "-o",
        "json",
        "--query",
        "SELECT first_name FROM employees WHERE salary > 80000",
    ]);
    assert_eq!(output.status.code(), Some(2));

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["correct"], false);
    assert_eq!(result["outcome"]["verdict"], "not_equivalent");
}

#[test]
fn test_check_syntax_error_exits_two() {
    let output = sqlprep(&["check", "1", "--query", "selct * from employees"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("Query error"));
}

#[test]
fn test_unknown_question_fails() {
    let output = sqlprep(&["show", "999"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[E009]"));
}

#[test]
fn test_sandbox_single_query() {
    let output = sqlprep(&[
        "sandbox",
        "--query",
        "SELECT COUNT(*) AS n FROM customers",
        "-o",
        "json",
    ]);
    assert!(output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["columns"][0], "n");
    assert_eq!(result["rows"][0][0], 8);
}

#[test]
fn test_practice_session_from_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_sqlprep"))
        .args(["--project-dir", FIXTURE, "practice", "--id", "3"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(
            b"SELECT department_name, location\nFROM departments\nORDER BY department_name\nEND\nQUIT\n",
        )
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Question #3"));
    assert!(text.contains("Questions Attempted: 1"));
    assert!(text.contains("Accuracy: 100.0%"));
}

#[test]
fn test_setup_file_database() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("practice.duckdb");
    let db_arg = db_path.to_str().unwrap();

    let setup = sqlprep(&["--database", db_arg, "setup"]);
    assert!(setup.status.success(), "{}", String::from_utf8_lossy(&setup.stderr));
    assert!(db_path.exists());

    let check = sqlprep(&["--database", db_arg, "check", "1", "--query", "SELECT * FROM employees"]);
    assert!(check.status.success());
}

#[test]
fn test_setup_refuses_memory_database() {
    let output = sqlprep(&["setup"]);
    assert_eq!(output.status.code(), Some(1));
}
