//! End-to-end analysis against a small node_modules tree on disk.

use depstats::{DepStats, Diagnostic, NativeRuntime, RecordingSink, UNRESOLVED_MAIN, dep_stats};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn write(path: &Path, content: impl AsRef<[u8]>) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// An express-style app with body-parser and a package with no entry point.
fn express_app() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(
        &root.join("package.json"),
        r#"{"name":"express-app","version":"1.0.0","private":true}"#,
    );
    write(&root.join("app.js"), "require('body-parser')\n");

    let body_parser = root.join("node_modules/body-parser");
    write(
        &body_parser.join("package.json"),
        r#"{"name":"body-parser","version":"1.19.0","description":"Node.js body parsing middleware"}"#,
    );
    write(&body_parser.join("index.js"), "x".repeat(2656));
    write(&body_parser.join("lib/read.js"), "y".repeat(4330));
    write(&body_parser.join("lib/types/json.js"), "z".repeat(5299));
    write(&body_parser.join("lib/types/raw.js"), "r".repeat(1884));

    let pkg = root.join("node_modules/pkg");
    write(&pkg.join("package.json"), r#"{"name":"pkg","version":"1.0.0"}"#);
    write(&pkg.join("a.js"), "a");
    write(&pkg.join("sub/b.js"), "b");

    temp
}

#[tokio::test]
async fn no_modules_gives_empty_map() {
    let app = express_app();
    let stats = dep_stats(app.path(), Vec::<PathBuf>::new()).await.unwrap();
    assert!(stats.is_empty());
}

#[tokio::test]
async fn body_parser_modules_are_grouped() {
    let app = express_app();

    let stats = dep_stats(
        app.path(),
        [
            "./node_modules/body-parser/lib/types/json.js",
            "./node_modules/body-parser/lib/types/raw.js",
            "./node_modules/body-parser/lib/read.js",
            "./node_modules/body-parser/index.js",
        ],
    )
    .await
    .unwrap();

    assert_eq!(stats.len(), 1);
    let body_parser = stats.get("body-parser@1.19.0").unwrap();
    assert_eq!(body_parser.main, "index.js");
    assert_eq!(body_parser.rel_path, PathBuf::from("node_modules/body-parser"));
    assert_eq!(body_parser.full_path, app.path().join("node_modules/body-parser"));

    let summary: Vec<(PathBuf, &str)> = body_parser
        .modules
        .iter()
        .map(|m| (m.package_path.clone(), m.human_size.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (PathBuf::from("index.js"), "2.66 kB"),
            (PathBuf::from("lib/read.js"), "4.33 kB"),
            (PathBuf::from("lib/types/json.js"), "5.3 kB"),
            (PathBuf::from("lib/types/raw.js"), "1.88 kB"),
        ]
    );
    assert_eq!(body_parser.modules[0].size, 2656);
    assert_eq!(
        body_parser.modules[0].rel_path,
        PathBuf::from("node_modules/body-parser/index.js")
    );
}

#[tokio::test]
async fn modules_across_packages_and_exclusions() {
    let app = express_app();
    let outside = TempDir::new().unwrap();
    let loose = outside.path().join("loose.js");
    write(&loose, "loose");

    let sink = Arc::new(RecordingSink::new());
    let inputs = vec![
        PathBuf::from("app.js"),
        PathBuf::from("node_modules/pkg/sub/b.js"),
        PathBuf::from("node_modules/pkg/a.js"),
        PathBuf::from("node_modules/body-parser/missing.js"),
        loose.clone(),
    ];

    let stats = DepStats::new(app.path())
        .runtime(Arc::new(NativeRuntime::new()))
        .sink(sink.clone())
        .modules(inputs.clone())
        .analyze()
        .await
        .unwrap();

    let keys: Vec<_> = stats.keys().cloned().collect();
    assert_eq!(keys, vec!["express-app@1.0.0", "pkg@1.0.0"]);

    let app_pkg = stats.get("express-app@1.0.0").unwrap();
    assert_eq!(app_pkg.main, UNRESOLVED_MAIN);
    assert_eq!(app_pkg.rel_path, PathBuf::new());

    let pkg = stats.get("pkg@1.0.0").unwrap();
    assert_eq!(pkg.main, UNRESOLVED_MAIN);
    let package_paths: Vec<_> = pkg.modules.iter().map(|m| m.package_path.clone()).collect();
    assert_eq!(package_paths, vec![PathBuf::from("a.js"), PathBuf::from("sub/b.js")]);

    let diagnostics = sink.diagnostics();
    let excluded = diagnostics.iter().filter(|d| d.is_exclusion()).count();
    assert_eq!(stats.module_count(), inputs.len() - excluded);
    assert!(diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::UnresolvableModule { path, .. } if path.ends_with("missing.js")
    )));
}

#[tokio::test]
async fn directory_named_package_json_is_not_a_manifest() {
    let app = express_app();
    let sub = app.path().join("node_modules/pkg/sub");
    fs::create_dir_all(sub.join("package.json")).unwrap();
    write(&sub.join("x.js"), "x");

    let stats = dep_stats(app.path(), ["node_modules/pkg/sub/x.js"])
        .await
        .unwrap();

    let keys: Vec<_> = stats.keys().cloned().collect();
    assert_eq!(keys, vec!["pkg@1.0.0"]);

    let pkg = stats.get("pkg@1.0.0").unwrap();
    assert_eq!(pkg.modules.len(), 1);
    assert_eq!(pkg.modules[0].package_path, PathBuf::from("sub/x.js"));
}

#[tokio::test]
async fn lookup_owner_on_disk_result() {
    let app = express_app();
    let stats = dep_stats(app.path(), ["node_modules/body-parser/lib/read.js"])
        .await
        .unwrap();

    let read_js = app.path().join("node_modules/body-parser/lib/read.js");
    let owner = stats.lookup_owner(&read_js).unwrap();
    assert_eq!(owner.package.key, "body-parser@1.19.0");
    assert_eq!(owner.module.size, 4330);

    assert!(stats.lookup_owner(&app.path().join("app.js")).is_none());
}

#[tokio::test]
async fn analysis_is_deterministic() {
    let app = express_app();
    let inputs = [
        "node_modules/pkg/a.js",
        "node_modules/body-parser/index.js",
        "app.js",
    ];

    let first = dep_stats(app.path(), inputs).await.unwrap();
    let second = dep_stats(app.path(), inputs.iter().rev().copied()).await.unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
