//! In-memory runtime for tests.
//!
//! `MemoryRuntime` keeps a table of files keyed by absolute path. Directories
//! exist implicitly as ancestors of files. Individual paths can be marked so
//! that `metadata` fails, which lets tests exercise stat failures without
//! racing a real filesystem.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Extensions tried by `MemoryRuntime::resolve`, in order.
const EXTENSIONS: &[&str] = &["js", "json", "node"];

/// Simple in-memory filesystem runtime.
///
/// # Example
///
/// ```rust,ignore
/// use depstats::MemoryRuntime;
///
/// let runtime = MemoryRuntime::new("/app")
///     .with_file("/app/node_modules/pkg/package.json", r#"{"name":"pkg"}"#)
///     .with_file("/app/node_modules/pkg/index.js", "module.exports = 1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRuntime {
    cwd: PathBuf,
    files: BTreeMap<PathBuf, Vec<u8>>,
    stat_failures: BTreeSet<PathBuf>,
}

impl MemoryRuntime {
    /// Create an empty runtime whose working directory is `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Default::default()
        }
    }

    /// Add a file with the given content.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) -> Self {
        self.files.insert(path.into(), content.as_ref().to_vec());
        self
    }

    /// Make `metadata` fail for `path` while the file still resolves.
    pub fn with_stat_failure(mut self, path: impl Into<PathBuf>) -> Self {
        self.stat_failures.insert(path.into());
        self
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }
}

#[async_trait]
impl Runtime for MemoryRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        if self.stat_failures.contains(path) {
            return Err(RuntimeError::Io(format!(
                "Failed to get metadata for {}: simulated failure",
                path.display()
            )));
        }

        if let Some(content) = self.files.get(path) {
            return Ok(FileMetadata {
                size: content.len() as u64,
                is_dir: false,
                is_file: true,
            });
        }

        if self.is_dir(path) {
            return Ok(FileMetadata {
                size: 0,
                is_dir: true,
                is_file: false,
            });
        }

        Err(RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn resolve(&self, specifier: &str, from: &Path) -> RuntimeResult<PathBuf> {
        let candidate = Path::new(specifier);

        if self.is_file(candidate) {
            return Ok(candidate.to_path_buf());
        }

        for ext in EXTENSIONS {
            let mut with_ext = candidate.as_os_str().to_os_string();
            with_ext.push(".");
            with_ext.push(ext);
            let with_ext = PathBuf::from(with_ext);
            if self.is_file(&with_ext) {
                return Ok(with_ext);
            }
        }

        let index = candidate.join("index.js");
        if self.is_file(&index) {
            return Ok(index);
        }

        Err(RuntimeError::ResolutionFailed {
            specifier: specifier.to_string(),
            from: from.to_path_buf(),
            reason: "module not found".to_string(),
        })
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}
