use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_check_with_query() {
    let cli = Cli::parse_from([
        "sqlprep",
        "-p",
        "demo",
        "check",
        "3",
        "--query",
        "SELECT 1",
        "-o",
        "json",
    ]);
    assert_eq!(cli.global.project_dir, "demo");
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.id, 3);
            assert_eq!(args.query.as_deref(), Some("SELECT 1"));
            assert_eq!(args.output, OutputFormat::Json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_check_query_conflicts_with_file() {
    let result = Cli::try_parse_from([
        "sqlprep", "check", "1", "--query", "SELECT 1", "--file", "q.sql",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::parse_from(["sqlprep", "ls", "--difficulty", "hard", "-d", "practice.duckdb"]);
    assert_eq!(cli.global.database.as_deref(), Some("practice.duckdb"));
    match cli.command {
        Commands::Ls(args) => {
            assert_eq!(args.difficulty.map(Difficulty::from), Some(Difficulty::Hard));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
