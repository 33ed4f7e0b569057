//! sp-core - Core library for sqlprep
//!
//! This crate provides configuration parsing, the read-only question
//! repository, and the in-memory session statistics shared by all sqlprep
//! components.

pub mod config;
pub mod error;
pub mod project;
pub mod question;
pub mod session;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use project::Project;
pub use question::{Difficulty, Question, QuestionSet};
pub use session::{SessionStats, StatsSnapshot};
