//! Command-line interface definition for depstats.
//!
//! # Command Structure
//!
//! - `depstats analyze` - group loaded modules by owning package
//! - `depstats owner` - find the package that owns one module

mod commands;
mod tests;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{AnalyzeArgs, Command, ModuleArgs, OwnerArgs};

/// depstats - dependency footprint of a JavaScript program
#[derive(Parser, Debug)]
#[command(
    name = "depstats",
    version,
    about = "Group loaded JavaScript modules by owning package",
    long_about = "depstats takes the module files a program actually loaded and groups them\n\
                  by the package whose package.json is their nearest ancestor, reporting\n\
                  each package's entry point and the size of every contributed file."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Also lists every module with its size in table output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a configuration file
    ///
    /// Defaults to depstats.config.json in the current directory, if present.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
