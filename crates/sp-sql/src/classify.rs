//! Read-only classification of submitted SQL
//!
//! The practice database is a shared fixture. Queries are always executed in
//! a transaction that is rolled back, but the shell still wants to tell the
//! user when a statement would have changed data.

use crate::parser::SqlParser;
use sqlparser::ast::Statement;
use std::fmt;

/// What a piece of SQL would do to the database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementClass {
    /// Every statement only reads
    ReadOnly,
    /// At least one statement writes data or changes the schema
    Mutating,
    /// The parser could not make sense of it; the database decides
    Unknown,
}

impl fmt::Display for StatementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementClass::ReadOnly => write!(f, "read-only"),
            StatementClass::Mutating => write!(f, "mutating"),
            StatementClass::Unknown => write!(f, "unknown"),
        }
    }
}

fn is_read_only(stmt: &Statement) -> bool {
    matches!(
        stmt,
        Statement::Query(_)
            | Statement::Explain { .. }
            | Statement::ExplainTable { .. }
            | Statement::ShowTables { .. }
            | Statement::ShowColumns { .. }
    )
}

/// Classify `sql` as read-only, mutating, or unknown
pub fn classify(sql: &str) -> StatementClass {
    match SqlParser::new().parse(sql) {
        Ok(stmts) if stmts.iter().all(is_read_only) => StatementClass::ReadOnly,
        Ok(_) => StatementClass::Mutating,
        Err(_) => StatementClass::Unknown,
    }
}

/// Whether `sql` is a single query whose outermost level has an `ORDER BY`.
///
/// Results are compared row by row, so a query without one can return its
/// rows in an engine-chosen order.
pub fn has_order_by(sql: &str) -> bool {
    match SqlParser::new().parse(sql) {
        Ok(stmts) => match stmts.as_slice() {
            [Statement::Query(query)] => query.order_by.is_some(),
            _ => false,
        },
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
