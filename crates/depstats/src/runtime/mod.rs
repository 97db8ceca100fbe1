//! Filesystem runtime abstraction.
//!
//! The analyzer never touches `std::fs` directly. Everything it needs from the
//! host (reading manifests, stat calls, existence checks, module resolution)
//! goes through the `Runtime` trait so the grouping logic can run against the
//! real filesystem or an in-memory table in tests.

pub mod native;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Module resolution failed
    #[error("Failed to resolve module '{specifier}' from '{}': {reason}", from.display())]
    ResolutionFailed {
        specifier: String,
        from: PathBuf,
        reason: String,
    },

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

/// File metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Whether this is a file
    pub is_file: bool,
}

/// Platform runtime trait
///
/// Implementations provide the handful of read-only filesystem operations the
/// analyzer performs. All of them are expected to be side-effect free.
///
/// # Example
///
/// ```rust,ignore
/// use depstats::runtime::{Runtime, RuntimeResult};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct MyRuntime;
///
/// #[async_trait]
/// impl Runtime for MyRuntime {
///     async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
///         std::fs::read(path).map_err(|e| RuntimeError::Io(e.to_string()))
///     }
///
///     // ... implement other methods
/// }
/// ```
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file from the filesystem
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get file metadata
    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path exists and is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Confirm that `specifier` denotes a loadable module when required from `from`.
    ///
    /// Returns the path the module loader would actually load.
    fn resolve(&self, specifier: &str, from: &Path) -> RuntimeResult<PathBuf>;

    /// Get the current working directory
    fn get_cwd(&self) -> RuntimeResult<PathBuf>;
}
