//! Runtime context for CLI commands

use anyhow::{Context, Result};
use sp_core::{Config, Difficulty, Project};
use sp_db::{Database, DuckDbBackend};
use std::path::Path;
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Runtime context containing loaded project and database connection
pub struct RuntimeContext {
    /// The loaded project
    pub project: Project,

    /// Database connection
    pub db: Arc<dyn Database>,
}

impl RuntimeContext {
    /// Load the project and open the practice database.
    ///
    /// An in-memory database starts empty, so the setup script is applied
    /// to it here. File-backed databases are left as `sqlprep setup` made them.
    pub async fn new(args: &GlobalArgs, difficulty: Option<Difficulty>) -> Result<Self> {
        let project = load_project(args, difficulty)?;
        let db = open_database(&project)?;

        if project.config.database.is_in_memory() {
            let script = project.setup_script();
            db.setup(&script).await.with_context(|| {
                format!("Failed to prepare practice data from {}", script.display())
            })?;
        }

        Ok(Self {
            project,
            db: Arc::new(db),
        })
    }
}

/// Load configuration with CLI overrides applied
pub(crate) fn load_config(args: &GlobalArgs, root: &Path) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        Config::load(Path::new(config_path)).context("Failed to load configuration file")?
    } else {
        Config::load_from_dir(root).context("Failed to load project configuration")?
    };

    if let Some(database) = &args.database {
        config.database.path = database.clone();
    }
    if let Some(secs) = args.timeout {
        if secs == 0 {
            anyhow::bail!("--timeout must be at least 1 second");
        }
        config.database.query_timeout_secs = secs;
    }

    Ok(config)
}

/// Load the project without opening a database
pub(crate) fn load_project(args: &GlobalArgs, difficulty: Option<Difficulty>) -> Result<Project> {
    let root =
        Project::resolve_root(Path::new(&args.project_dir)).context("Failed to load project")?;
    let config = load_config(args, &root)?;
    let project =
        Project::with_config(root, config, difficulty).context("Failed to load questions")?;

    log::debug!(
        "Loaded project '{}' with {} questions",
        project.config.name,
        project.questions.len()
    );
    Ok(project)
}

/// Open the configured database with the configured time limit
pub(crate) fn open_database(project: &Project) -> Result<DuckDbBackend> {
    let path = resolve_db_path(project);
    let db = DuckDbBackend::new(&path)
        .with_context(|| format!("Failed to connect to database '{}'", path))?
        .with_timeout(project.config.query_timeout());
    Ok(db)
}

/// Relative database files live under the project root
pub(crate) fn resolve_db_path(project: &Project) -> String {
    let configured = &project.config.database.path;
    if project.config.database.is_in_memory() || Path::new(configured).is_absolute() {
        configured.clone()
    } else {
        project.root.join(configured).display().to_string()
    }
}
