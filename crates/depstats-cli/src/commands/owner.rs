//! Owner command implementation.

use crate::cli::OwnerArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;
use depstats::Diagnostic;
use depstats::paths::absolutize;
use std::path::Path;

/// Execute the owner command.
///
/// FILE is analyzed together with any other listed modules, then looked up
/// in the result. Not finding it is an error, so the exit status is non-zero.
pub async fn execute(args: OwnerArgs, config_path: Option<&Path>) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let config = utils::load_config(&args.input, None, config_path, &cwd)?;

    let mut modules = utils::collect_modules(&args.input, &cwd).await?;
    modules.push(args.file.clone());

    let target = absolutize(&args.file, &config.base_dir);
    let analysis = utils::run_analysis(&config, modules).await?;

    match analysis.stats.lookup_owner(&target) {
        Some(owner) => {
            ui::print_owner(&owner);
            Ok(())
        }
        None => {
            let reason = analysis.diagnostics.iter().find(|diagnostic| match diagnostic {
                Diagnostic::UnresolvableModule { path, .. } | Diagnostic::NoOwningPackage { path } => {
                    path == &target
                }
                Diagnostic::DuplicatePackageKey { .. } => false,
            });
            let hint = match reason {
                Some(diagnostic) => diagnostic.to_string(),
                None => "Its package was replaced by another with the same name and version".to_string(),
            };
            Err(CliError::NotFound { path: target, hint })
        }
    }
}
