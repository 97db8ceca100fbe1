//! Per-package dependency statistics.
//!
//! [`DepStats`] turns a list of loaded module paths into a
//! [`DependencyStats`] map: one [`PackageInfo`] per owning package, keyed by
//! `"<name>@<version>"`, each listing the modules it contributed with their
//! sizes.

mod analyzer;


pub use analyzer::{DepStats, dep_stats};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A module located relative to its package and to the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePathInfo {
    /// Path relative to the owning package's root. Never contains `..`.
    pub package_path: PathBuf,
    /// Path relative to the base directory of the analysis.
    pub rel_path: PathBuf,
    /// Absolute path.
    pub full_path: PathBuf,
}

impl ModulePathInfo {
    /// Attach a byte size, producing the reported module entry.
    pub fn with_size(self, size: u64) -> ModuleInfo {
        ModuleInfo {
            package_path: self.package_path,
            rel_path: self.rel_path,
            full_path: self.full_path,
            size,
            human_size: crate::size::format_size(size),
        }
    }
}

/// A module with its size at analysis time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    pub package_path: PathBuf,
    pub rel_path: PathBuf,
    pub full_path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// `size` formatted with [`format_size`](crate::format_size)
    pub human_size: String,
}

/// Aggregated description of one owning package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Declared or detected entry point, or `<unresolved>`
    pub main: String,
    /// Package root (the directory holding its package.json)
    pub full_path: PathBuf,
    /// Package root relative to the base directory
    pub rel_path: PathBuf,
    /// Modules ordered by ascending `package_path`
    pub modules: Vec<ModuleInfo>,
}

impl PackageInfo {
    /// Sum of module sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.modules.iter().map(|m| m.size).sum()
    }

    /// Package metadata without its module list.
    pub fn summary(&self, key: &str) -> PackageSummary {
        PackageSummary {
            key: key.to_string(),
            name: self.name.clone(),
            version: self.version.clone(),
            main: self.main.clone(),
            full_path: self.full_path.clone(),
            rel_path: self.rel_path.clone(),
        }
    }
}

/// [`PackageInfo`] without `modules`, plus the key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub main: String,
    pub full_path: PathBuf,
    pub rel_path: PathBuf,
}

/// Result of [`DependencyStats::lookup_owner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleOwner<'a> {
    pub package: PackageSummary,
    pub module: &'a ModuleInfo,
}

/// Packages keyed by `"<name>@<version>"`, in first-encounter order.
///
/// Keys are not unique per package directory: two directories with the same
/// name and version share a key, and the one analyzed last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyStats {
    packages: IndexMap<String, PackageInfo>,
}

impl DependencyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package, returning the entry it replaced under the same key.
    ///
    /// A replaced entry keeps its original position in iteration order.
    pub(crate) fn insert(&mut self, key: String, package: PackageInfo) -> Option<PackageInfo> {
        self.packages.insert(key, package)
    }

    pub fn get(&self, key: &str) -> Option<&PackageInfo> {
        self.packages.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PackageInfo)> {
        self.packages.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.packages.keys()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Number of modules across all packages.
    pub fn module_count(&self) -> usize {
        self.packages.values().map(|p| p.modules.len()).sum()
    }

    /// Total size in bytes across all packages.
    pub fn total_size(&self) -> u64 {
        self.packages.values().map(PackageInfo::total_size).sum()
    }

    /// Find the package that owns the module at `full_path`.
    ///
    /// Returns `None` for paths that were not part of the analysis (or were
    /// excluded from it); that is an expected outcome, not an error.
    pub fn lookup_owner(&self, full_path: &Path) -> Option<ModuleOwner<'_>> {
        self.packages.iter().find_map(|(key, package)| {
            package
                .modules
                .iter()
                .find(|module| module.full_path == full_path)
                .map(|module| ModuleOwner {
                    package: package.summary(key),
                    module,
                })
        })
    }
}

impl<'a> IntoIterator for &'a DependencyStats {
    type Item = (&'a String, &'a PackageInfo);
    type IntoIter = indexmap::map::Iter<'a, String, PackageInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}
