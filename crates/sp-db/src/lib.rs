//! sp-db - Query execution layer for sqlprep
//!
//! This crate provides the `Database` trait, the DuckDB implementation,
//! and the result types handed to the verifier.

pub mod duckdb;
pub mod error;
pub mod result;
pub mod traits;
pub mod value;

pub use duckdb::{DuckDbBackend, DEFAULT_QUERY_TIMEOUT};
pub use error::{DbError, DbResult};
pub use result::ResultSet;
pub use traits::{ColumnInfo, Database};
pub use value::CellValue;
