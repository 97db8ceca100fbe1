//! Native Runtime Implementation
//!
//! `Runtime` implementation for native environments. Filesystem calls wrap
//! `std::fs` inside `spawn_blocking`; module resolution is delegated to
//! `oxc_resolver` configured for Node.js `require()` semantics.

// NativeRuntime is the one place that touches std::fs directly
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;

use crate::runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Resolution options for [`NativeRuntime`].
///
/// Defaults mirror what `require.resolve` accepts: CommonJS conditions,
/// `.js`/`.json`/`.node` extensions and the `main` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Extensions tried when a path has none (with leading dot)
    pub extensions: Vec<String>,
    /// `exports` conditions to match
    pub condition_names: Vec<String>,
    /// package.json fields consulted for a directory's entry point
    pub main_fields: Vec<String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".js".into(), ".json".into(), ".node".into()],
            condition_names: vec!["node".into(), "require".into()],
            main_fields: vec!["main".into()],
        }
    }
}

/// Native filesystem Runtime implementation.
///
/// # Example
///
/// ```rust,ignore
/// use depstats::{NativeRuntime, Runtime};
///
/// let runtime = NativeRuntime::new();
/// let metadata = runtime.metadata(Path::new("package.json")).await?;
/// ```
#[derive(Clone)]
pub struct NativeRuntime {
    resolver: Arc<oxc_resolver::Resolver>,
    config: ResolveConfig,
}

impl NativeRuntime {
    /// Create a runtime with default resolution options.
    pub fn new() -> Self {
        Self::with_config(ResolveConfig::default())
    }

    /// Create a runtime with custom resolution options.
    pub fn with_config(config: ResolveConfig) -> Self {
        let resolver = oxc_resolver::Resolver::new(oxc_resolver::ResolveOptions {
            condition_names: config.condition_names.clone(),
            extensions: config.extensions.clone(),
            main_fields: config.main_fields.clone(),
            ..Default::default()
        });

        Self {
            resolver: Arc::new(resolver),
            config,
        }
    }

    /// Resolution options this runtime was built with.
    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }
}

impl Default for NativeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NativeRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeRuntime")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || {
            std::fs::read(&path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RuntimeError::FileNotFound(path.clone())
                } else {
                    RuntimeError::Io(format!("Failed to read {}: {}", path.display(), e))
                }
            })
        })
        .await
        .map_err(|e| RuntimeError::Other(format!("Task join error: {}", e)))?
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || {
            let metadata = std::fs::metadata(&path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RuntimeError::FileNotFound(path.clone())
                } else {
                    RuntimeError::Io(format!(
                        "Failed to get metadata for {}: {}",
                        path.display(),
                        e
                    ))
                }
            })?;

            Ok(FileMetadata {
                size: metadata.len(),
                is_dir: metadata.is_dir(),
                is_file: metadata.is_file(),
            })
        })
        .await
        .map_err(|e| RuntimeError::Other(format!("Task join error: {}", e)))?
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn resolve(&self, specifier: &str, from: &Path) -> RuntimeResult<PathBuf> {
        let from_dir = if from.is_dir() {
            from
        } else {
            from.parent().unwrap_or(from)
        };

        self.resolver
            .resolve(from_dir, specifier)
            .map(|res| res.path().to_path_buf())
            .map_err(|e| RuntimeError::ResolutionFailed {
                specifier: specifier.to_string(),
                from: from.to_path_buf(),
                reason: e.to_string(),
            })
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        std::env::current_dir().map_err(|e| {
            RuntimeError::Io(format!("Failed to get current working directory: {}", e))
        })
    }
}
