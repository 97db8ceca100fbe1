//! Command implementations for the depstats CLI.
//!
//! - [`analyze`] - per-package statistics for a module list
//! - [`owner`] - look up the package owning one module
//!
//! Each command provides an `execute` function that takes its parsed
//! arguments and returns a Result.

pub mod analyze;
pub mod owner;
pub mod utils;

pub use analyze::execute as analyze_execute;
pub use owner::execute as owner_execute;
