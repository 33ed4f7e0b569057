//! Project discovery and loading

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::question::{Difficulty, QuestionSet};
use std::path::{Path, PathBuf};

/// A practice project: configuration plus the questions it points at
#[derive(Debug)]
pub struct Project {
    /// Project root directory
    pub root: PathBuf,

    /// Project configuration
    pub config: Config,

    /// Questions discovered under `question_paths`
    pub questions: QuestionSet,
}

impl Project {
    /// Load a project from a directory containing sqlprep.yml
    pub fn load(path: &Path) -> CoreResult<Self> {
        let root = Self::resolve_root(path)?;
        let config = Config::load_from_dir(&root)?;
        Self::with_config(root, config, None)
    }

    /// Load a project using an explicit config, optionally restricted to one difficulty
    pub fn with_config(
        root: PathBuf,
        config: Config,
        difficulty: Option<Difficulty>,
    ) -> CoreResult<Self> {
        let questions = QuestionSet::load(&config.question_paths_absolute(&root), difficulty)?;

        Ok(Self {
            root,
            config,
            questions,
        })
    }

    /// Make `path` absolute and check that it exists
    pub fn resolve_root(path: &Path) -> CoreResult<PathBuf> {
        let root = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        if !root.exists() {
            return Err(CoreError::ProjectNotFound {
                path: root.display().to_string(),
            });
        }
        Ok(root)
    }

    /// Absolute path of the fixture script
    pub fn setup_script(&self) -> PathBuf {
        self.config.setup_script_absolute(&self.root)
    }
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
