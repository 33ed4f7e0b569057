//! Result-set comparison
//!
//! `verify` decides whether a submitted query's result is equivalent to the
//! reference result. The checks run in a fixed order and stop at the first
//! failure:
//!
//! 1. column names, compared as case-insensitive sets
//! 2. column count, when the name sets agree but an output column repeats
//! 3. row count
//! 4. row contents, in order, after re-projecting the submitted columns onto
//!    the expected column order
//!
//! Row order is significant. A reference solution without a unique
//! `ORDER BY` can therefore reject an otherwise-correct answer.

use serde::Serialize;
use sp_db::{CellValue, ResultSet};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Why two result sets are not equivalent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Mismatch {
    /// The column name sets differ
    ColumnNames {
        /// Expected names the result does not have
        missing: Vec<String>,
        /// Result names that were not expected
        unexpected: Vec<String>,
    },

    /// Same names, different number of columns
    ColumnCount { actual: usize, expected: usize },

    /// Different number of rows
    RowCount { actual: usize, expected: usize },

    /// First differing cell, scanning rows then columns in expected order
    CellValue {
        /// Zero-based row index
        row: usize,
        column: String,
        actual: CellValue,
        expected: CellValue,
        /// The submitted row, projected onto the expected column order
        actual_row: Vec<CellValue>,
        expected_row: Vec<CellValue>,
    },
}

impl Mismatch {
    /// Stable reason code
    pub fn reason(&self) -> &'static str {
        match self {
            Mismatch::ColumnNames { .. } => "column_names",
            Mismatch::ColumnCount { .. } => "column_count",
            Mismatch::RowCount { .. } => "row_count",
            Mismatch::CellValue { .. } => "cell_value",
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::ColumnNames {
                missing,
                unexpected,
            } => {
                write!(f, "Column names differ")?;
                if !missing.is_empty() {
                    write!(f, "; missing: {}", missing.join(", "))?;
                }
                if !unexpected.is_empty() {
                    write!(f, "; unexpected: {}", unexpected.join(", "))?;
                }
                Ok(())
            }
            Mismatch::ColumnCount { actual, expected } => {
                write!(f, "Expected {} columns, got {}", expected, actual)
            }
            Mismatch::RowCount { actual, expected } => {
                write!(f, "Expected {} rows, got {}", expected, actual)
            }
            Mismatch::CellValue {
                row,
                column,
                actual,
                expected,
                ..
            } => write!(
                f,
                "Row {}, column '{}': expected {} ({}), got {} ({})",
                row + 1,
                column,
                expected,
                expected.kind(),
                actual,
                actual.kind()
            ),
        }
    }
}

/// Verdict of one comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", content = "mismatch", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Equivalent,
    NotEquivalent(Mismatch),
}

impl ComparisonOutcome {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, ComparisonOutcome::Equivalent)
    }

    /// Reason code, `None` when equivalent
    pub fn reason(&self) -> Option<&'static str> {
        self.mismatch().map(Mismatch::reason)
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            ComparisonOutcome::Equivalent => None,
            ComparisonOutcome::NotEquivalent(m) => Some(m),
        }
    }
}

impl fmt::Display for ComparisonOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOutcome::Equivalent => write!(f, "Correct"),
            ComparisonOutcome::NotEquivalent(m) => write!(f, "Incorrect: {}", m),
        }
    }
}

/// Compare a submitted result against the reference result.
///
/// `expected_columns` overrides the reference result's column names. Cells
/// are then read from the reference by name; an override column the
/// reference does not produce is only checked for presence.
pub fn verify(
    actual: &ResultSet,
    expected: &ResultSet,
    expected_columns: Option<&[String]>,
) -> ComparisonOutcome {
    let expected_names: &[String] = expected_columns.unwrap_or(expected.columns.as_slice());

    if let Some(mismatch) = compare_names(&actual.columns, expected_names) {
        return ComparisonOutcome::NotEquivalent(mismatch);
    }

    if actual.column_count() != expected_names.len() {
        return ComparisonOutcome::NotEquivalent(Mismatch::ColumnCount {
            actual: actual.column_count(),
            expected: expected_names.len(),
        });
    }

    let actual_idx = project(&actual.columns, expected_names);
    if actual_idx.iter().any(Option::is_none) {
        // Same names and width, but a name repeats a different number of times
        let used: HashSet<usize> = actual_idx.iter().flatten().copied().collect();
        return ComparisonOutcome::NotEquivalent(Mismatch::ColumnNames {
            missing: expected_names
                .iter()
                .zip(&actual_idx)
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.clone())
                .collect(),
            unexpected: (0..actual.column_count())
                .filter(|i| !used.contains(i))
                .map(|i| actual.columns[i].clone())
                .collect(),
        });
    }

    if actual.row_count() != expected.row_count() {
        return ComparisonOutcome::NotEquivalent(Mismatch::RowCount {
            actual: actual.row_count(),
            expected: expected.row_count(),
        });
    }

    let expected_idx: Vec<Option<usize>> = if expected_columns.is_some() {
        project(&expected.columns, expected_names)
    } else {
        (0..expected_names.len()).map(Some).collect()
    };

    for (row, (a_row, e_row)) in actual.rows.iter().zip(&expected.rows).enumerate() {
        for (col, name) in expected_names.iter().enumerate() {
            let (Some(ai), Some(ei)) = (actual_idx[col], expected_idx[col]) else {
                continue;
            };
            let (a, e) = (cell(a_row, ai), cell(e_row, ei));
            if !a.matches(&e) {
                return ComparisonOutcome::NotEquivalent(Mismatch::CellValue {
                    row,
                    column: name.clone(),
                    actual: a,
                    expected: e,
                    actual_row: pick(a_row, &actual_idx),
                    expected_row: pick(e_row, &expected_idx),
                });
            }
        }
    }

    ComparisonOutcome::Equivalent
}

/// Case-insensitive set comparison of column names
pub(crate) fn compare_names(actual: &[String], expected: &[String]) -> Option<Mismatch> {
    let actual_set: HashSet<String> = actual.iter().map(|c| c.to_lowercase()).collect();
    let expected_set: HashSet<String> = expected.iter().map(|c| c.to_lowercase()).collect();

    let missing = difference(expected, &actual_set);
    let unexpected = difference(actual, &expected_set);

    if missing.is_empty() && unexpected.is_empty() {
        None
    } else {
        Some(Mismatch::ColumnNames {
            missing,
            unexpected,
        })
    }
}

/// Names from `names` whose lowercase form is absent from `other`, in order
/// and without repeats
fn difference(names: &[String], other: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|n| {
            let lower = n.to_lowercase();
            !other.contains(&lower) && seen.insert(lower)
        })
        .cloned()
        .collect()
}

/// For each target name, the index of the matching source column.
///
/// Repeated names pair up by occurrence: the second `x` in `targets` maps to
/// the second `x` in `source`.
fn project(source: &[String], targets: &[String]) -> Vec<Option<usize>> {
    let mut positions: HashMap<String, VecDeque<usize>> = HashMap::new();
    for (idx, name) in source.iter().enumerate() {
        positions.entry(name.to_lowercase()).or_default().push_back(idx);
    }
    targets
        .iter()
        .map(|name| {
            positions
                .get_mut(&name.to_lowercase())
                .and_then(VecDeque::pop_front)
        })
        .collect()
}

fn cell(row: &[CellValue], idx: usize) -> CellValue {
    row.get(idx).cloned().unwrap_or(CellValue::Null)
}

fn pick(row: &[CellValue], indices: &[Option<usize>]) -> Vec<CellValue> {
    indices
        .iter()
        .map(|idx| idx.map(|i| cell(row, i)).unwrap_or(CellValue::Null))
        .collect()
}

#[cfg(test)]
#[path = "verifier_test.rs"]
mod tests;
