//! depstats CLI - per-package footprint of loaded JavaScript modules.
//!
//! Parses arguments, initializes logging, and dispatches to a command.

use clap::Parser;
use depstats_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let config_path = args.config.as_deref();
    let result = match args.command {
        cli::Command::Analyze(analyze_args) => {
            commands::analyze_execute(analyze_args, config_path, args.verbose).await
        }
        cli::Command::Owner(owner_args) => commands::owner_execute(owner_args, config_path).await,
    };

    // Convert CLI errors to miette diagnostics at the process boundary
    result.map_err(error::cli_error_to_miette)
}
