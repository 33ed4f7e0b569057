//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use sp_core::Difficulty;
use std::path::PathBuf;

/// sqlprep - SQL interview practice against an embedded database
#[derive(Parser, Debug)]
#[command(name = "sqlprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database path (`:memory:` or a DuckDB file)
    #[arg(short, long, global = true, env = "SQLPREP_DATABASE")]
    pub database: Option<String>,

    /// Override the per-query time limit in seconds
    #[arg(long, global = true, env = "SQLPREP_TIMEOUT_SECS")]
    pub timeout: Option<u64>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List questions
    Ls(LsArgs),

    /// Show one question
    Show(ShowArgs),

    /// Check a query against a question
    Check(CheckArgs),

    /// Show a question's reference solution and its result
    Solution(SolutionArgs),

    /// Interactive practice session
    Practice(PracticeArgs),

    /// Run free-form queries against the practice data
    Sandbox(SandboxArgs),

    /// Describe the practice tables
    Schema(SchemaArgs),

    /// Create or reset a file-backed practice database
    Setup(SetupArgs),

    /// Test the database connection
    Ping,

    /// Check that every reference solution runs and matches its question
    Validate(ValidateArgs),
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

/// Difficulty filter accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Only list questions of this difficulty
    #[arg(long, value_enum)]
    pub difficulty: Option<DifficultyArg>,

    /// Only list questions tagged with this topic (case-insensitive)
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Question id
    pub id: u32,

    /// Also print the hint
    #[arg(long)]
    pub hint: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Question id
    pub id: u32,

    /// Query text (reads stdin when neither --query nor --file is given)
    #[arg(short, long, conflicts_with = "file")]
    pub query: Option<String>,

    /// Read the query from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the solution command
#[derive(Args, Debug)]
pub struct SolutionArgs {
    /// Question id
    pub id: u32,

    /// Only print the solution text
    #[arg(long)]
    pub no_run: bool,
}

/// Arguments for the practice command
#[derive(Args, Debug)]
pub struct PracticeArgs {
    /// Restrict the session to one difficulty
    #[arg(long, value_enum)]
    pub difficulty: Option<DifficultyArg>,

    /// Pick questions at random instead of in order
    #[arg(long)]
    pub random: bool,

    /// Start with this question
    #[arg(long)]
    pub id: Option<u32>,
}

/// Arguments for the sandbox command
#[derive(Args, Debug)]
pub struct SandboxArgs {
    /// Run a single query and exit
    #[arg(short, long)]
    pub query: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the schema command
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Only describe these tables (comma-separated)
    #[arg(short, long)]
    pub tables: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the setup command
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Override the setup script path
    #[arg(short, long)]
    pub script: Option<PathBuf>,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Treat warnings as failures
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
