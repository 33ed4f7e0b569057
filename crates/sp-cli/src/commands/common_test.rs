use super::*;
use sp_db::CellValue;

fn employees() -> ResultSet {
    ResultSet::new(
        vec!["id".to_string(), "first_name".to_string()],
        vec![
            vec![CellValue::Int(1), CellValue::from("Alice")],
            vec![CellValue::Int(2), CellValue::Null],
            vec![CellValue::Int(3), CellValue::from("Christopher")],
        ],
    )
}

#[test]
fn test_format_table() {
    let table = format_table(&employees(), 20);
    let expected = "\
+----+-------------+
| id | first_name  |
+----+-------------+
| 1  | Alice       |
| 2  | NULL        |
| 3  | Christopher |
+----+-------------+";
    assert_eq!(table, expected);
}

#[test]
fn test_format_table_truncates() {
    let table = format_table(&employees(), 2);
    assert!(table.ends_with("\n... (1 more rows)"));
    assert!(!table.contains("Christopher"));
}

#[test]
fn test_format_table_empty() {
    let result = ResultSet::empty(vec!["id".to_string()]);
    assert_eq!(format_table(&result, 20), "No results returned");
}

#[test]
fn test_plural_rows() {
    assert_eq!(plural_rows(1), "1 row");
    assert_eq!(plural_rows(0), "0 rows");
    assert_eq!(plural_rows(15), "15 rows");
}

#[test]
fn test_read_query_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("answer.sql");
    std::fs::write(&path, "\n  SELECT 1;  \n").unwrap();

    assert_eq!(read_query(None, Some(&path)).unwrap(), "SELECT 1;");
    assert_eq!(read_query(Some("SELECT 2"), Some(&path)).unwrap(), "SELECT 2");
    assert!(read_query(Some("   "), None).is_err());
}

#[test]
fn test_exit_code_display_is_empty() {
    assert_eq!(ExitCode(EXIT_INCORRECT).to_string(), "");
}
