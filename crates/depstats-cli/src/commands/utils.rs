//! Shared utilities for command implementations.
//!
//! - Module list collection from arguments and modules files
//! - Configuration loading from parsed arguments
//! - Running the analysis with a recording sink

use crate::cli::ModuleArgs;
use crate::config::{ConfigOverrides, DepstatsConfig, OutputFormat};
use crate::error::{CliError, Result, ResultExt};
use depstats::{DepStats, DependencyStats, Diagnostic, NativeRuntime, RecordingSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of one analysis run, with the diagnostics it produced.
#[derive(Debug)]
pub struct Analysis {
    pub stats: DependencyStats,
    pub diagnostics: Vec<Diagnostic>,
}

/// Current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to determine current directory")
}

/// Module paths listed in a modules file: one per line, surrounding
/// whitespace trimmed, blank lines and `#` comments skipped.
pub fn parse_module_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}

/// Read and parse a modules file.
pub async fn read_modules_file(path: &Path) -> Result<Vec<PathBuf>> {
    let content = tokio::fs::read_to_string(path).await.with_path(path)?;
    Ok(parse_module_list(&content))
}

/// Positional modules followed by those from `--modules-file`, if given.
///
/// The modules file path is taken from `cwd`; the module paths themselves
/// stay as written and are later anchored at the base directory.
pub async fn collect_modules(input: &ModuleArgs, cwd: &Path) -> Result<Vec<PathBuf>> {
    let mut modules = input.modules.clone();

    if let Some(file) = &input.modules_file {
        let listed = read_modules_file(&cwd.join(file)).await?;
        tracing::debug!(file = %file.display(), count = listed.len(), "read modules file");
        modules.extend(listed);
    }

    Ok(modules)
}

/// Load configuration with `--base-dir` and the requested format on top.
pub fn load_config(
    input: &ModuleArgs,
    format: Option<OutputFormat>,
    config_path: Option<&Path>,
    cwd: &Path,
) -> Result<DepstatsConfig> {
    let overrides = ConfigOverrides {
        base_dir: input.base_dir.clone(),
        format,
    };
    DepstatsConfig::load(&overrides, config_path, cwd)
}

/// Run the analysis with the configured resolver, collecting diagnostics.
pub async fn run_analysis(config: &DepstatsConfig, modules: Vec<PathBuf>) -> Result<Analysis> {
    if !config.base_dir.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Base directory is not a directory: {}",
            config.base_dir.display()
        )));
    }

    let sink = Arc::new(RecordingSink::new());
    let runtime = NativeRuntime::with_config(config.to_resolve_config());

    let stats = DepStats::new(&config.base_dir)
        .runtime(Arc::new(runtime))
        .sink(sink.clone())
        .modules(modules)
        .analyze()
        .await?;

    Ok(Analysis {
        stats,
        diagnostics: sink.take(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_module_list() {
        let content = "\n# loaded by the server\n./node_modules/a/index.js\n   \n  lib/b.js  \n#c.js\n";
        assert_eq!(
            parse_module_list(content),
            vec![
                PathBuf::from("./node_modules/a/index.js"),
                PathBuf::from("lib/b.js")
            ]
        );
    }

    #[tokio::test]
    async fn test_collect_modules_appends_file_entries() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("loaded.txt"), "b.js\nc.js\n").unwrap();

        let input = ModuleArgs {
            modules: vec![PathBuf::from("a.js")],
            base_dir: None,
            modules_file: Some(PathBuf::from("loaded.txt")),
        };
        let modules = collect_modules(&input, temp.path()).await.unwrap();
        assert_eq!(
            modules,
            vec![PathBuf::from("a.js"), PathBuf::from("b.js"), PathBuf::from("c.js")]
        );
    }

    #[tokio::test]
    async fn test_missing_modules_file() {
        let temp = TempDir::new().unwrap();
        let input = ModuleArgs {
            modules_file: Some(PathBuf::from("missing.txt")),
            ..ModuleArgs::default()
        };
        let err = collect_modules(&input, temp.path()).await.unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_run_analysis_rejects_missing_base_dir() {
        let temp = TempDir::new().unwrap();
        let config = DepstatsConfig {
            base_dir: temp.path().join("nope"),
            ..DepstatsConfig::default()
        };
        let err = run_analysis(&config, vec![]).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_run_analysis_collects_diagnostics() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("node_modules/pkg")).unwrap();
        fs::write(
            temp.path().join("node_modules/pkg/package.json"),
            r#"{"name":"pkg","version":"2.0.0","main":"lib.js"}"#,
        )
        .unwrap();
        fs::write(temp.path().join("node_modules/pkg/lib.js"), "module.exports = 1").unwrap();

        let config = DepstatsConfig {
            base_dir: temp.path().to_path_buf(),
            ..DepstatsConfig::default()
        };
        let analysis = run_analysis(
            &config,
            vec![
                PathBuf::from("node_modules/pkg/lib.js"),
                PathBuf::from("node_modules/pkg/gone.js"),
            ],
        )
        .await
        .unwrap();

        assert_eq!(analysis.stats.get("pkg@2.0.0").unwrap().main, "lib.js");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(analysis.diagnostics[0].is_exclusion());
    }
}
