//! Error types for sp-core

use thiserror::Error;

/// Core error type for sqlprep
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Project directory not found
    #[error("[E004] Project directory not found: {path}")]
    ProjectNotFound { path: String },

    /// E005: Question file could not be parsed
    #[error("[E005] Failed to parse question file {path}: {details}")]
    QuestionParseError { path: String, details: String },

    /// E006: A question record failed validation
    #[error("[E006] Invalid question #{id} in {path}: {reason}")]
    QuestionInvalid { id: u32, path: String, reason: String },

    /// E007: Two records share the same identifier
    #[error("[E007] Duplicate question id {id} in {path1} and {path2}")]
    DuplicateQuestion { id: u32, path1: String, path2: String },

    /// E008: Unknown difficulty name
    #[error("[E008] Unknown difficulty '{0}': expected easy, medium, or hard")]
    UnknownDifficulty(String),

    /// E009: Question lookup failed
    #[error("[E009] Question not found: {id}")]
    QuestionNotFound { id: u32 },

    /// E014: IO error
    #[error("[E014] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E016: IO error with file path context
    #[error("[E016] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
