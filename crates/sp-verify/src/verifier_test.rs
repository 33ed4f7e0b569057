use super::*;

fn rs(columns: &[&str], rows: Vec<Vec<CellValue>>) -> ResultSet {
    ResultSet::new(columns.iter().map(|c| c.to_string()).collect(), rows)
}

fn names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn earners() -> ResultSet {
    rs(
        &["first_name", "salary"],
        vec![
            vec!["Alice".into(), CellValue::Int(95000)],
            vec!["Mia".into(), CellValue::Int(92000)],
            vec!["Kate".into(), CellValue::Int(88000)],
            vec!["Bob".into(), CellValue::Int(85000)],
        ],
    )
}

fn reversed(result: &ResultSet) -> ResultSet {
    let mut rows = result.rows.clone();
    rows.reverse();
    ResultSet::new(result.columns.clone(), rows)
}

#[test]
fn test_identical_results_are_equivalent() {
    let result = earners();
    assert!(verify(&result, &result, None).is_equivalent());
    assert!(verify(&result, &result, Some(result.columns.as_slice())).is_equivalent());
}

#[test]
fn test_column_order_does_not_matter() {
    let expected = earners();
    let actual = rs(
        &["SALARY", "First_Name"],
        expected
            .rows
            .iter()
            .map(|r| vec![r[1].clone(), r[0].clone()])
            .collect(),
    );
    assert_eq!(verify(&actual, &expected, None), ComparisonOutcome::Equivalent);
}

#[test]
fn test_row_order_matters() {
    let expected = earners();
    let outcome = verify(&reversed(&expected), &expected, None);

    match outcome.mismatch() {
        Some(Mismatch::CellValue {
            row,
            column,
            actual,
            expected,
            ..
        }) => {
            assert_eq!(*row, 0);
            assert_eq!(column, "first_name");
            assert_eq!(*actual, CellValue::from("Bob"));
            assert_eq!(*expected, CellValue::from("Alice"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_identical_rows_in_any_order() {
    let expected = rs(&["n"], vec![vec![CellValue::Int(1)], vec![CellValue::Int(1)]]);
    assert!(verify(&reversed(&expected), &expected, None).is_equivalent());
}

#[test]
fn test_numeric_representations_match() {
    let expected = rs(&["total"], vec![vec![CellValue::Decimal("5.00".to_string())]]);
    let actual = rs(&["total"], vec![vec![CellValue::Int(5)]]);
    assert!(verify(&actual, &expected, None).is_equivalent());
}

#[test]
fn test_text_does_not_match_number() {
    let expected = rs(&["total"], vec![vec![CellValue::Int(5)]]);
    let actual = rs(&["total"], vec![vec!["5".into()]]);
    let outcome = verify(&actual, &expected, None);
    assert_eq!(outcome.reason(), Some("cell_value"));
    assert!(outcome.to_string().contains("(text)"));
}

#[test]
fn test_row_count_mismatch_reports_both_counts() {
    let expected = earners();
    let actual = ResultSet::new(expected.columns.clone(), expected.rows[..2].to_vec());

    assert_eq!(
        verify(&actual, &expected, None),
        ComparisonOutcome::NotEquivalent(Mismatch::RowCount {
            actual: 2,
            expected: 4
        })
    );
}

#[test]
fn test_empty_actual_against_rows() {
    let expected = earners();
    let actual = ResultSet::empty(expected.columns.clone());
    assert_eq!(verify(&actual, &expected, None).reason(), Some("row_count"));
}

#[test]
fn test_missing_column() {
    let expected = earners();
    let actual = rs(
        &["first_name"],
        expected.rows.iter().map(|r| vec![r[0].clone()]).collect(),
    );

    assert_eq!(
        verify(&actual, &expected, None),
        ComparisonOutcome::NotEquivalent(Mismatch::ColumnNames {
            missing: names(&["salary"]),
            unexpected: vec![],
        })
    );
}

#[test]
fn test_extra_column() {
    let expected = rs(&["first_name"], vec![vec!["Alice".into()]]);
    let actual = rs(&["first_name", "id"], vec![vec!["Alice".into(), CellValue::Int(1)]]);

    assert_eq!(
        verify(&actual, &expected, None),
        ComparisonOutcome::NotEquivalent(Mismatch::ColumnNames {
            missing: vec![],
            unexpected: names(&["id"]),
        })
    );
}

#[test]
fn test_column_mismatch_wins_over_row_content() {
    let expected = rs(&["a"], vec![vec![CellValue::Int(1)]]);
    let actual = rs(&["b"], vec![vec![CellValue::Int(1)], vec![CellValue::Int(2)]]);
    assert_eq!(verify(&actual, &expected, None).reason(), Some("column_names"));
}

#[test]
fn test_duplicated_column_is_count_mismatch() {
    let expected = rs(&["a", "b"], vec![vec![CellValue::Int(1), CellValue::Int(2)]]);
    let actual = rs(
        &["a", "b", "a"],
        vec![vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(1)]],
    );
    assert_eq!(
        verify(&actual, &expected, None),
        ComparisonOutcome::NotEquivalent(Mismatch::ColumnCount {
            actual: 3,
            expected: 2
        })
    );
}

#[test]
fn test_repeated_names_pair_by_occurrence() {
    let expected = rs(&["x", "x"], vec![vec![CellValue::Int(1), CellValue::Int(2)]]);
    let same = rs(&["x", "x"], vec![vec![CellValue::Int(1), CellValue::Int(2)]]);
    let swapped = rs(&["x", "x"], vec![vec![CellValue::Int(2), CellValue::Int(1)]]);

    assert!(verify(&same, &expected, None).is_equivalent());
    assert_eq!(verify(&swapped, &expected, None).reason(), Some("cell_value"));
}

#[test]
fn test_empty_expected() {
    let expected = ResultSet::empty(names(&["id"]));
    assert!(verify(&ResultSet::empty(names(&["ID"])), &expected, None).is_equivalent());

    let actual = rs(&["id"], vec![vec![CellValue::Int(1)]]);
    assert_eq!(verify(&actual, &expected, None).reason(), Some("row_count"));
}

#[test]
fn test_expected_columns_override_names() {
    // Reference produces an unaliased expression, the question asks for an alias
    let expected = rs(&["count_star()"], vec![vec![CellValue::Int(15)]]);
    let override_cols = names(&["headcount"]);

    let aliased = rs(&["headcount"], vec![vec![CellValue::Int(15)]]);
    let unaliased = rs(&["count_star()"], vec![vec![CellValue::Int(15)]]);

    assert!(verify(&aliased, &expected, Some(override_cols.as_slice())).is_equivalent());
    assert_eq!(
        verify(&unaliased, &expected, Some(override_cols.as_slice())),
        ComparisonOutcome::NotEquivalent(Mismatch::ColumnNames {
            missing: names(&["headcount"]),
            unexpected: names(&["count_star()"]),
        })
    );
}

#[test]
fn test_expected_columns_override_compares_by_name() {
    let expected = earners();
    let override_cols = names(&["salary", "first_name"]);
    let mut actual = expected.clone();
    actual.rows[1][1] = CellValue::Int(1);

    match verify(&actual, &expected, Some(override_cols.as_slice())) {
        ComparisonOutcome::NotEquivalent(Mismatch::CellValue {
            row,
            column,
            actual_row,
            expected_row,
            ..
        }) => {
            assert_eq!(row, 1);
            assert_eq!(column, "salary");
            assert_eq!(actual_row, vec![CellValue::Int(1), "Mia".into()]);
            assert_eq!(expected_row, vec![CellValue::Int(92000), "Mia".into()]);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_null_handling() {
    let expected = rs(&["bonus"], vec![vec![CellValue::Null]]);
    assert!(verify(&expected.clone(), &expected, None).is_equivalent());

    let zero = rs(&["bonus"], vec![vec![CellValue::Int(0)]]);
    assert_eq!(verify(&zero, &expected, None).reason(), Some("cell_value"));
}

#[test]
fn test_outcome_display() {
    assert_eq!(ComparisonOutcome::Equivalent.to_string(), "Correct");
    let outcome = ComparisonOutcome::NotEquivalent(Mismatch::RowCount {
        actual: 3,
        expected: 4,
    });
    assert_eq!(outcome.to_string(), "Incorrect: Expected 4 rows, got 3");

    let names = Mismatch::ColumnNames {
        missing: vec!["salary".to_string()],
        unexpected: vec!["id".to_string()],
    };
    assert_eq!(
        names.to_string(),
        "Column names differ; missing: salary; unexpected: id"
    );
}

#[test]
fn test_outcome_serializes_with_reason() {
    let outcome = ComparisonOutcome::NotEquivalent(Mismatch::RowCount {
        actual: 1,
        expected: 2,
    });
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["verdict"], "not_equivalent");
    assert_eq!(json["mismatch"]["reason"], "row_count");
    assert_eq!(json["mismatch"]["expected"], 2);
}
