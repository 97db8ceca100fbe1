//! The grouping analyzer.

use indexmap::IndexMap;
use path_clean::PathClean;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::manifest::{PackageJson, find_manifest};
use crate::paths::{absolutize, relative_path};
use crate::runtime::Runtime;
use crate::runtime::native::NativeRuntime;
use crate::stats::{DependencyStats, ModulePathInfo, PackageInfo};
use crate::{Error, Result};

/// Builder for a dependency statistics run.
///
/// # Example
///
/// ```no_run
/// use depstats::DepStats;
///
/// # #[tokio::main]
/// # async fn main() -> depstats::Result<()> {
/// let stats = DepStats::new("./my-app")
///     .modules(["./node_modules/debug/src/index.js", "./node_modules/ms/index.js"])
///     .analyze()
///     .await?;
/// assert!(stats.len() <= 2);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct DepStats {
    base_dir: PathBuf,
    modules: Vec<PathBuf>,
    runtime: Option<Arc<dyn Runtime>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl DepStats {
    /// Start an analysis anchored at `base_dir`.
    ///
    /// Relative module paths are resolved against it, and every reported
    /// relative path is expressed from it.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            modules: Vec::new(),
            runtime: None,
            sink: None,
        }
    }

    /// Add one candidate module path.
    pub fn module(mut self, path: impl Into<PathBuf>) -> Self {
        self.modules.push(path.into());
        self
    }

    /// Add candidate module paths.
    pub fn modules<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.modules.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Filesystem runtime to use. Defaults to [`NativeRuntime`].
    pub fn runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Receiver for non-fatal diagnostics. Defaults to [`TracingSink`].
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run the analysis.
    ///
    /// Modules that do not resolve or have no owning package are reported to
    /// the sink and left out. A manifest that cannot be loaded, or a module
    /// that cannot be stat'ed, fails the whole run.
    pub async fn analyze(self) -> Result<DependencyStats> {
        let runtime = self
            .runtime
            .unwrap_or_else(|| Arc::new(NativeRuntime::new()) as Arc<dyn Runtime>);
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(TracingSink) as Arc<dyn DiagnosticSink>);

        let base_dir = if self.base_dir.is_absolute() {
            self.base_dir.clean()
        } else {
            runtime.get_cwd()?.join(&self.base_dir).clean()
        };

        tracing::debug!(
            base_dir = %base_dir.display(),
            candidates = self.modules.len(),
            "analyzing dependency stats"
        );

        let confirmed = confirm_modules(runtime.as_ref(), sink.as_ref(), &base_dir, &self.modules);
        let grouped = group_by_package(runtime.as_ref(), sink.as_ref(), &base_dir, &confirmed);
        describe_packages(runtime.as_ref(), sink.as_ref(), &base_dir, grouped).await
    }
}

/// Analyze `modules` under `base_dir` with the native runtime, logging
/// diagnostics through `tracing`.
pub async fn dep_stats<P, I, S>(base_dir: P, modules: I) -> Result<DependencyStats>
where
    P: Into<PathBuf>,
    I: IntoIterator<Item = S>,
    S: Into<PathBuf>,
{
    DepStats::new(base_dir).modules(modules).analyze().await
}

/// Anchor candidates at `base_dir`, keep the loadable ones, and order them by
/// plain byte order of the absolute path.
fn confirm_modules(
    runtime: &dyn Runtime,
    sink: &dyn DiagnosticSink,
    base_dir: &Path,
    candidates: &[PathBuf],
) -> Vec<PathBuf> {
    let mut confirmed: Vec<PathBuf> = candidates
        .iter()
        .map(|candidate| absolutize(candidate, base_dir))
        .filter(|full_path| {
            // Specifiers are strings; a non-UTF-8 path is passed lossily and
            // will normally fail to resolve.
            if full_path.to_str().is_none() {
                tracing::debug!(path = %full_path.display(), "module path is not valid UTF-8");
            }
            match runtime.resolve(&full_path.to_string_lossy(), base_dir) {
                Ok(_) => true,
                Err(e) => {
                    sink.report(Diagnostic::UnresolvableModule {
                        path: full_path.clone(),
                        reason: e.to_string(),
                    });
                    false
                }
            }
        })
        .collect();

    // Byte order, not component order: "/a/b-c" sorts before "/a/b/c".
    confirmed.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    confirmed.dedup();
    confirmed
}

/// Group modules under the manifest of their nearest enclosing package.
fn group_by_package(
    runtime: &dyn Runtime,
    sink: &dyn DiagnosticSink,
    base_dir: &Path,
    modules: &[PathBuf],
) -> IndexMap<PathBuf, Vec<ModulePathInfo>> {
    let mut grouped: IndexMap<PathBuf, Vec<ModulePathInfo>> = IndexMap::new();

    for full_path in modules {
        let start_dir = full_path.parent().unwrap_or(full_path);
        let Some(manifest_path) = find_manifest(runtime, start_dir) else {
            sink.report(Diagnostic::NoOwningPackage {
                path: full_path.clone(),
            });
            continue;
        };

        let package_dir = manifest_path.parent().unwrap_or(Path::new(""));
        let info = ModulePathInfo {
            package_path: relative_path(package_dir, full_path),
            rel_path: relative_path(base_dir, full_path),
            full_path: full_path.clone(),
        };
        grouped.entry(manifest_path).or_default().push(info);
    }

    tracing::debug!(packages = grouped.len(), "grouped modules by package");
    grouped
}

/// Load each group's manifest and stat its modules.
async fn describe_packages(
    runtime: &dyn Runtime,
    sink: &dyn DiagnosticSink,
    base_dir: &Path,
    grouped: IndexMap<PathBuf, Vec<ModulePathInfo>>,
) -> Result<DependencyStats> {
    let mut stats = DependencyStats::new();

    for (manifest_path, path_infos) in grouped {
        let manifest = PackageJson::from_path(runtime, &manifest_path).await?;
        let key = manifest.identity_key();
        let main = manifest.resolved_main(runtime);
        let full_path = manifest.root().to_path_buf();
        let rel_path = relative_path(base_dir, &full_path);

        let mut modules = Vec::with_capacity(path_infos.len());
        for info in path_infos {
            let metadata = runtime
                .metadata(&info.full_path)
                .await
                .map_err(|source| Error::Stat {
                    path: info.full_path.clone(),
                    source,
                })?;
            modules.push(info.with_size(metadata.size));
        }

        tracing::debug!(package = %key, modules = modules.len(), "described package");

        let package = PackageInfo {
            name: manifest.name,
            version: manifest.version,
            main,
            full_path: full_path.clone(),
            rel_path,
            modules,
        };

        if let Some(previous) = stats.insert(key.clone(), package) {
            sink.report(Diagnostic::DuplicatePackageKey {
                key,
                replaced: previous.full_path,
                by: full_path,
            });
        }
    }

    Ok(stats)
}
