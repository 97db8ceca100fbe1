//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::utils;
use crate::config::OutputFormat;
use crate::error::{Result, ResultExt};
use crate::ui;
use std::path::Path;

/// Execute the analyze command.
///
/// 1. Load configuration (flags over environment over file over defaults)
/// 2. Collect module paths from arguments and `--modules-file`
/// 3. Run the analysis, printing excluded modules as warnings
/// 4. Render a table, or JSON to stdout or `--out`
pub async fn execute(args: AnalyzeArgs, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let wants_json = args.json || args.out.is_some();
    let config = utils::load_config(
        &args.input,
        wants_json.then_some(OutputFormat::Json),
        config_path,
        &cwd,
    )?;

    let modules = utils::collect_modules(&args.input, &cwd).await?;
    if modules.is_empty() {
        ui::info("No modules given; pass module paths or --modules-file");
    }
    let requested = modules.len();

    let analysis = utils::run_analysis(&config, modules).await?;
    let excluded = ui::print_exclusions(&analysis.diagnostics);
    let stats = &analysis.stats;

    match (&args.out, config.format) {
        (Some(out), _) => {
            let out = cwd.join(out);
            if let Some(parent) = out.parent() {
                tokio::fs::create_dir_all(parent).await.with_path(parent)?;
            }
            let json = serde_json::to_string_pretty(stats)?;
            tokio::fs::write(&out, json + "\n").await.with_path(&out)?;
            ui::success(&format!("Wrote {}", out.display()));
        }
        (None, OutputFormat::Json) => println!("{}", serde_json::to_string_pretty(stats)?),
        (None, OutputFormat::Table) => ui::print_package_table(stats, verbose),
    }

    tracing::debug!(requested, excluded, packages = stats.len(), "analysis finished");
    ui::success(&format!(
        "Analyzed {} modules in {} packages ({} excluded)",
        stats.module_count(),
        stats.len(),
        excluded
    ));

    Ok(())
}
