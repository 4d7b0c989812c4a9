//! Blog CLI - a single-session command-line blog manager
//!
//! Parses arguments, sets up logging, and hands off to the subcommand
//! handlers. Running with no subcommand starts the interactive session.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod output;
mod session;
mod ui;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = logging::init_tracing(cli.debug) {
        eprintln!("Warning: logging disabled: {}", err);
    }

    if let Err(err) = run(&cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);
    match &cli.command {
        None | Some(Commands::Session) => commands::handle_session(&ctx),
        Some(Commands::Init(args)) => commands::handle_init(&ctx, args),
        Some(Commands::Check) => commands::handle_check(&ctx),
        Some(Commands::PruneTags) => commands::handle_prune_tags(&ctx),
        Some(Commands::Completions { shell }) => commands::handle_completions(*shell),
    }
}
