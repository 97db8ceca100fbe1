//! Error handling for the depstats CLI.
//!
//! - [`CliError`] is what every command returns.
//! - [`ConfigError`] covers loading and validating configuration.
//! - [`ResultExt`] attaches paths, hints, or context to any error that
//!   converts into `CliError`.
//!
//! # Example
//!
//! ```rust,no_run
//! use depstats_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_list(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Pass --modules-file with one module path per line")
//! }
//! ```

use miette::Report;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The analysis itself failed (unreadable manifest, unstat-able module)
    #[error("Analysis failed: {0}")]
    Analysis(#[from] depstats::Error),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A looked-up module is not owned by any analyzed package
    #[error("{} is not part of any analyzed package\n\nHint: {hint}", .path.display())]
    NotFound {
        /// The module that was looked up
        path: PathBuf,
        /// Why it may be missing
        hint: String,
    },

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}\n\nHint: Create depstats.config.json or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// The merged configuration could not be extracted
    #[error("Invalid configuration: {0}\n\nHint: Check depstats.config.json and DEPSTATS_* variables")]
    Extract(String),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Extract(err.to_string())
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    ///
    /// ```rust,no_run
    /// # use depstats_cli::error::{CliError, Result, ResultExt};
    /// # fn run() -> Result<()> {
    /// let result: Result<()> = Err(CliError::Custom("no modules".into()));
    /// result.with_hint("Pass module paths or --modules-file")?;
    /// # Ok(())
    /// # }
    /// ```
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

/// Convert a [`CliError`] into a miette report for display at exit.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Analysis(depstats::Error::Manifest { path, reason }) => miette::miette!(
            help = "Fix or remove the package.json, or leave its modules out of the list",
            "Cannot read package manifest {}: {}",
            path.display(),
            reason
        ),
        CliError::Analysis(depstats::Error::Stat { path, source }) => miette::miette!(
            help = "The module resolved but could not be stat'ed; check permissions",
            "Cannot read size of {}: {}",
            path.display(),
            source
        ),
        other => miette::miette!("{}", other),
    }
}
