//! depstats CLI - report which packages a program's loaded modules belong to.
//!
//! This crate wraps the `depstats` library in a command-line interface. It
//! reads a list of module paths (arguments and/or a modules file), runs the
//! analysis, and prints a per-package table, JSON, or the owner of one file.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `analyze` and `owner` implementations
//! - [`config`] - layered configuration (defaults, file, environment, flags)
//! - [`error`] - CLI error types with actionable messages
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - terminal output helpers
//!
//! # Example
//!
//! ```rust
//! use depstats_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
