//! # depstats
//!
//! Dependency footprint statistics for JavaScript programs.
//!
//! Given a base directory and the list of module files a program actually
//! loaded, `depstats` groups those files by the package that owns them (the
//! package whose `package.json` is the nearest ancestor of the file) and
//! reports per-package metadata alongside per-file sizes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use depstats::dep_stats;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stats = dep_stats(
//!     "./my-app",
//!     ["./node_modules/body-parser/index.js", "./node_modules/body-parser/lib/read.js"],
//! )
//! .await?;
//!
//! for (key, package) in stats.iter() {
//!     println!("{key}: {} modules, main = {}", package.modules.len(), package.main);
//! }
//! # Ok(()) }
//! ```
//!
//! ## Using the builder
//!
//! ```no_run
//! use std::sync::Arc;
//! use depstats::{DepStats, NativeRuntime, RecordingSink};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sink = Arc::new(RecordingSink::new());
//! let stats = DepStats::new("./my-app")
//!     .runtime(Arc::new(NativeRuntime::new()))
//!     .sink(sink.clone())
//!     .module("./node_modules/express/index.js")
//!     .analyze()
//!     .await?;
//!
//! println!("{} packages, {} excluded", stats.len(), sink.len());
//! # Ok(()) }
//! ```

pub mod diagnostics;
pub mod manifest;
pub mod paths;
pub mod runtime;
pub mod size;
pub mod stats;

pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, TracingSink};
pub use manifest::{MANIFEST_FILE, PackageJson, UNRESOLVED_MAIN};
pub use runtime::native::{NativeRuntime, ResolveConfig};
pub use runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
pub use size::format_size;
pub use stats::{
    DepStats, DependencyStats, ModuleInfo, ModuleOwner, ModulePathInfo, PackageInfo,
    PackageSummary, dep_stats,
};

#[cfg(any(test, feature = "test-utils"))]
pub use runtime::test_utils::MemoryRuntime;

use std::path::PathBuf;

/// Error types for depstats operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A package manifest was found but could not be read or parsed.
    #[error("Failed to load manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    /// A grouped module file could not be stat'ed.
    #[error("Failed to stat module {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    /// Any other runtime failure.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Result type alias for depstats operations.
pub type Result<T> = std::result::Result<T, Error>;
