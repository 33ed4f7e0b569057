//! sqlprep - SQL interview practice against an embedded database

use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands};
use commands::common::ExitCode;
use commands::{check, ls, ping, practice, sandbox, schema, setup, show, solution, validate};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Ls(args) => ls::execute(args, &cli.global).await,
        Commands::Show(args) => show::execute(args, &cli.global).await,
        Commands::Check(args) => check::execute(args, &cli.global).await,
        Commands::Solution(args) => solution::execute(args, &cli.global).await,
        Commands::Practice(args) => practice::execute(args, &cli.global).await,
        Commands::Sandbox(args) => sandbox::execute(args, &cli.global).await,
        Commands::Schema(args) => schema::execute(args, &cli.global).await,
        Commands::Setup(args) => setup::execute(args, &cli.global).await,
        Commands::Ping => ping::execute(&cli.global).await,
        Commands::Validate(args) => validate::execute(args, &cli.global).await,
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match run(&cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(code) => std::process::ExitCode::from(u8::try_from(code.0).unwrap_or(1)),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::ExitCode::FAILURE
            }
        },
    }
}
