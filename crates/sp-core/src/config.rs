//! Configuration types and parsing for sqlprep.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main project configuration from sqlprep.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directories containing `<difficulty>_questions.json` files
    #[serde(default = "default_question_paths")]
    pub question_paths: Vec<String>,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Result rendering options
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,

    /// SQL script that creates the practice schema and seed rows
    #[serde(default = "default_setup_script")]
    pub setup_script: String,

    /// Upper bound on a single statement's wall-clock time
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            setup_script: default_setup_script(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the database lives only for the duration of the process
    pub fn is_in_memory(&self) -> bool {
        self.path == DEFAULT_DB_PATH
    }
}

/// Result rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Rows printed before a result table is truncated
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}

const DEFAULT_DB_PATH: &str = ":memory:";

fn default_question_paths() -> Vec<String> {
    vec!["data".to_string()]
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_setup_script() -> String {
    "setup_db.sql".to_string()
}

fn default_query_timeout_secs() -> u64 {
    5
}

fn default_max_rows() -> usize {
    20
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for sqlprep.yml or sqlprep.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("sqlprep.yml");
        let yaml_path = dir.join("sqlprep.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.question_paths.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one question_paths entry must be specified".to_string(),
            });
        }

        if self.database.query_timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "database.query_timeout_secs must be greater than zero".to_string(),
            });
        }

        if self.display.max_rows == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "display.max_rows must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Question directories resolved against the project root
    pub fn question_paths_absolute(&self, root: &Path) -> Vec<PathBuf> {
        self.question_paths.iter().map(|p| root.join(p)).collect()
    }

    /// Setup script resolved against the project root
    pub fn setup_script_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.database.setup_script)
    }

    /// Statement timeout as a [`Duration`]
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.database.query_timeout_secs)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
