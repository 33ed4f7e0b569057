//! sp-sql - SQL parsing layer for sqlprep
//!
//! Wraps sqlparser-rs with the DuckDB dialect so submitted queries can be
//! classified before they reach the database.

pub mod classify;
pub mod error;
pub mod parser;

pub use classify::{classify, has_order_by, StatementClass};
pub use error::SqlError;
pub use parser::SqlParser;
