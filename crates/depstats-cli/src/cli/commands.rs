use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available depstats subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report per-package statistics for a list of loaded modules
    ///
    /// Each module is attributed to the package whose package.json is its
    /// nearest ancestor. Modules that do not resolve, or that have no owning
    /// package, are reported as excluded.
    Analyze(AnalyzeArgs),

    /// Print the package that owns a module
    ///
    /// Runs the same analysis as `analyze` and looks FILE up in the result.
    /// Exits with an error when FILE is not part of any package.
    Owner(OwnerArgs),
}

/// Where the module list comes from and what it is relative to.
#[derive(Args, Debug, Clone, Default)]
pub struct ModuleArgs {
    /// Module paths, absolute or relative to the base directory
    #[arg(value_name = "MODULES")]
    pub modules: Vec<PathBuf>,

    /// Base directory for relative paths and reported relative paths
    ///
    /// Overrides `baseDir` from the config file. Defaults to the current
    /// directory.
    #[arg(short = 'b', long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Read module paths from a file, one per line
    ///
    /// Blank lines and lines starting with `#` are ignored.
    #[arg(short = 'm', long, value_name = "FILE")]
    pub modules_file: Option<PathBuf>,
}

/// Arguments for the analyze command
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: ModuleArgs,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Write JSON output to a file instead of stdout
    ///
    /// Implies --json.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Arguments for the owner command
#[derive(Args, Debug, Clone)]
pub struct OwnerArgs {
    /// Module to look up
    ///
    /// Relative paths are taken from the base directory. FILE is always
    /// included in the analyzed module list.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub input: ModuleArgs,
}
