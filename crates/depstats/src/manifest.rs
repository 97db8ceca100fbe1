//! Package manifest (package.json) loading and lookup.
//!
//! Only the fields needed to describe a package are parsed: `name`,
//! `version` and `main`. Everything else in the manifest is ignored.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;
use crate::{Error, Result};

/// File name of a package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Entry point reported when a package declares no `main` and none can be detected.
pub const UNRESOLVED_MAIN: &str = "<unresolved>";

/// Maximum allowed size for package.json files (10MB)
const MAX_MANIFEST_SIZE: u64 = 10 * 1024 * 1024;

/// Parsed package.json structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageJson {
    /// Package name
    #[serde(default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
    /// Package version
    #[serde(default, deserialize_with = "string_or_none")]
    pub version: Option<String>,
    /// Declared entry point, relative to the package root
    #[serde(default, deserialize_with = "string_or_none")]
    pub main: Option<String>,
    /// File path this was loaded from
    #[serde(skip)]
    pub path: PathBuf,
}

impl PackageJson {
    /// Load package.json from a specific path using the provided runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Manifest`] when the file cannot be read, exceeds 10MB,
    /// is not UTF-8 or is not valid JSON.
    pub async fn from_path<R: Runtime + ?Sized>(runtime: &R, path: &Path) -> Result<Self> {
        let manifest_error = |reason: String| Error::Manifest {
            path: path.to_path_buf(),
            reason,
        };

        let metadata = runtime
            .metadata(path)
            .await
            .map_err(|e| manifest_error(format!("cannot read metadata: {e}")))?;

        if metadata.size > MAX_MANIFEST_SIZE {
            return Err(manifest_error(format!(
                "exceeds maximum size of {}MB",
                MAX_MANIFEST_SIZE / 1024 / 1024
            )));
        }

        let content_bytes = runtime
            .read_file(path)
            .await
            .map_err(|e| manifest_error(format!("cannot read file: {e}")))?;

        let content = String::from_utf8(content_bytes)
            .map_err(|e| manifest_error(format!("contains invalid UTF-8: {e}")))?;

        // Node tolerates a leading byte order mark
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        let mut pkg: PackageJson = serde_json::from_str(content)
            .map_err(|e| manifest_error(format!("invalid JSON: {e}")))?;

        pkg.path = path.to_path_buf();
        Ok(pkg)
    }

    /// Directory containing this manifest.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }

    /// Identity key `"<name>@<version>"`; absent fields render as `undefined`.
    pub fn identity_key(&self) -> String {
        format!(
            "{}@{}",
            self.name.as_deref().unwrap_or("undefined"),
            self.version.as_deref().unwrap_or("undefined")
        )
    }

    /// The declared `main`, or a detected entry point (see [`detect_main`]).
    pub fn resolved_main<R: Runtime + ?Sized>(&self, runtime: &R) -> String {
        match &self.main {
            Some(main) => main.clone(),
            None => detect_main(runtime, self.root(), self.name.as_deref()),
        }
    }
}

/// Non-string values (e.g. `"main": false`) are treated as absent.
fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Find the nearest manifest at or above `start_dir`.
///
/// Searches upward through parent directories until a `package.json` file is
/// found or the filesystem root is reached. A directory named `package.json`
/// does not count.
pub fn find_manifest<R: Runtime + ?Sized>(runtime: &R, start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILE))
        .find(|candidate| runtime.is_file(candidate))
}

/// Guess the entry point of a package that declares no `main`.
///
/// Prefers `index.js`, then `<name>.js`, and falls back to [`UNRESOLVED_MAIN`].
/// An absent name is spelled `undefined`, as in [`PackageJson::identity_key`],
/// so a nameless package can still be detected through `undefined.js`.
pub fn detect_main<R: Runtime + ?Sized>(runtime: &R, root: &Path, name: Option<&str>) -> String {
    if runtime.exists(&root.join("index.js")) {
        return "index.js".to_string();
    }

    let named = format!("{}.js", name.unwrap_or("undefined"));
    if runtime.exists(&root.join(&named)) {
        return named;
    }

    UNRESOLVED_MAIN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::MemoryRuntime;

    #[tokio::test]
    async fn test_from_path_reads_fields() {
        let runtime = MemoryRuntime::new("/").with_file(
            "/pkg/package.json",
            r#"{"name":"pkg","version":"1.0.0","main":"lib/index.js","dependencies":{"a":"1"}}"#,
        );

        let pkg = PackageJson::from_path(&runtime, Path::new("/pkg/package.json"))
            .await
            .unwrap();

        assert_eq!(pkg.name.as_deref(), Some("pkg"));
        assert_eq!(pkg.version.as_deref(), Some("1.0.0"));
        assert_eq!(pkg.main.as_deref(), Some("lib/index.js"));
        assert_eq!(pkg.root(), Path::new("/pkg"));
        assert_eq!(pkg.identity_key(), "pkg@1.0.0");
    }

    #[tokio::test]
    async fn test_missing_fields_render_undefined_in_key() {
        let runtime = MemoryRuntime::new("/").with_file("/pkg/package.json", r#"{"version":"2.0.0"}"#);

        let pkg = PackageJson::from_path(&runtime, Path::new("/pkg/package.json"))
            .await
            .unwrap();

        assert_eq!(pkg.name, None);
        assert_eq!(pkg.identity_key(), "undefined@2.0.0");
    }

    #[tokio::test]
    async fn test_non_string_main_is_absent() {
        let runtime = MemoryRuntime::new("/")
            .with_file("/pkg/package.json", r#"{"name":"pkg","version":"1.0.0","main":false}"#);

        let pkg = PackageJson::from_path(&runtime, Path::new("/pkg/package.json"))
            .await
            .unwrap();

        assert_eq!(pkg.main, None);
    }

    #[tokio::test]
    async fn test_leading_bom_is_ignored() {
        let runtime = MemoryRuntime::new("/")
            .with_file("/pkg/package.json", "\u{feff}{\"name\":\"bom\",\"version\":\"0.0.1\"}");

        let pkg = PackageJson::from_path(&runtime, Path::new("/pkg/package.json"))
            .await
            .unwrap();

        assert_eq!(pkg.identity_key(), "bom@0.0.1");
    }

    #[tokio::test]
    async fn test_invalid_json_is_manifest_error() {
        let runtime = MemoryRuntime::new("/").with_file("/pkg/package.json", "{ not json");

        let err = PackageJson::from_path(&runtime, Path::new("/pkg/package.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Manifest { .. }));
    }

    #[test]
    fn test_find_manifest_nearest_ancestor() {
        let runtime = MemoryRuntime::new("/")
            .with_file("/app/package.json", "{}")
            .with_file("/app/node_modules/pkg/package.json", "{}")
            .with_file("/app/node_modules/pkg/lib/deep/x.js", "");

        assert_eq!(
            find_manifest(&runtime, Path::new("/app/node_modules/pkg/lib/deep")),
            Some(PathBuf::from("/app/node_modules/pkg/package.json"))
        );
        assert_eq!(
            find_manifest(&runtime, Path::new("/app/src")),
            Some(PathBuf::from("/app/package.json"))
        );
    }

    #[test]
    fn test_find_manifest_skips_directory_named_package_json() {
        let runtime = MemoryRuntime::new("/")
            .with_file("/app/node_modules/pkg/package.json", "{}")
            .with_file("/app/node_modules/pkg/sub/package.json/inner.txt", "")
            .with_file("/app/node_modules/pkg/sub/x.js", "");

        assert_eq!(
            find_manifest(&runtime, Path::new("/app/node_modules/pkg/sub")),
            Some(PathBuf::from("/app/node_modules/pkg/package.json"))
        );
    }

    #[test]
    fn test_find_manifest_none_up_to_root() {
        let runtime = MemoryRuntime::new("/").with_file("/loose/x.js", "");
        assert_eq!(find_manifest(&runtime, Path::new("/loose")), None);
    }

    #[test]
    fn test_detect_main_order() {
        let root = Path::new("/pkg");

        let both = MemoryRuntime::new("/")
            .with_file("/pkg/index.js", "")
            .with_file("/pkg/pkg.js", "");
        assert_eq!(detect_main(&both, root, Some("pkg")), "index.js");

        let named = MemoryRuntime::new("/").with_file("/pkg/pkg.js", "");
        assert_eq!(detect_main(&named, root, Some("pkg")), "pkg.js");

        let none = MemoryRuntime::new("/").with_file("/pkg/other.js", "");
        assert_eq!(detect_main(&none, root, Some("pkg")), UNRESOLVED_MAIN);
        assert_eq!(detect_main(&none, root, None), UNRESOLVED_MAIN);
    }

    #[tokio::test]
    async fn test_nameless_package_detects_undefined_js() {
        let runtime = MemoryRuntime::new("/")
            .with_file("/pkg/package.json", r#"{"version":"1.0.0"}"#)
            .with_file("/pkg/undefined.js", "");

        let pkg = PackageJson::from_path(&runtime, Path::new("/pkg/package.json"))
            .await
            .unwrap();

        assert_eq!(pkg.identity_key(), "undefined@1.0.0");
        assert_eq!(pkg.resolved_main(&runtime), "undefined.js");
    }
}
