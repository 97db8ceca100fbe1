//! Table and lookup output for analysis results.

use console::Term;
use depstats::{DependencyStats, Diagnostic, ModuleOwner, format_size};
use owo_colors::OwoColorize;

use super::messages;

const HEADERS: [&str; 4] = ["Package", "Main", "Modules", "Size"];

/// One line of the package table, unstyled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRow {
    pub key: String,
    pub main: String,
    pub modules: usize,
    pub size: String,
}

/// Table rows in result order.
pub fn package_rows(stats: &DependencyStats) -> Vec<PackageRow> {
    stats
        .iter()
        .map(|(key, package)| PackageRow {
            key: key.clone(),
            main: package.main.clone(),
            modules: package.modules.len(),
            size: format_size(package.total_size()),
        })
        .collect()
}

/// Print the per-package table to stdout.
///
/// With `verbose`, every module is listed under its package with its size.
pub fn print_package_table(stats: &DependencyStats, verbose: bool) {
    let colored = console::colors_enabled();
    let rows = package_rows(stats);

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        widths[0] = widths[0].max(row.key.len());
        widths[1] = widths[1].max(row.main.len());
        widths[2] = widths[2].max(row.modules.to_string().len());
        widths[3] = widths[3].max(row.size.len());
    }

    let term_width = Term::stdout().size().1 as usize;
    let rule = "─".repeat(widths.iter().sum::<usize>().saturating_add(6).min(term_width.max(20)));

    let header = format!(
        "{:<w0$}  {:<w1$}  {:>w2$}  {:>w3$}",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        HEADERS[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    );
    if colored {
        println!("{}", header.bold());
    } else {
        println!("{}", header);
    }
    println!("{}", rule);

    for (row, (_, package)) in rows.iter().zip(stats.iter()) {
        let line = format!(
            "{:<w0$}  {:<w1$}  {:>w2$}  {:>w3$}",
            row.key,
            row.main,
            row.modules,
            row.size,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        );
        println!("{}", line);

        if verbose {
            for module in &package.modules {
                let entry = format!("    {}  {}", module.package_path.display(), module.human_size);
                if colored {
                    println!("{}", entry.dimmed());
                } else {
                    println!("{}", entry);
                }
            }
        }
    }

    println!("{}", rule);
    let total = format!(
        "Total: {} packages, {} modules, {}",
        stats.len(),
        stats.module_count(),
        format_size(stats.total_size())
    );
    if colored {
        println!("{}", total.green());
    } else {
        println!("{}", total);
    }
}

/// Print each diagnostic as a warning and return how many modules were
/// excluded.
pub fn print_exclusions(diagnostics: &[Diagnostic]) -> usize {
    for diagnostic in diagnostics {
        messages::warning(&diagnostic.to_string());
    }
    diagnostics.iter().filter(|d| d.is_exclusion()).count()
}

/// Print the owner of a module to stdout.
pub fn print_owner(owner: &ModuleOwner<'_>) {
    let package = &owner.package;
    let module = owner.module;

    println!("{}", package.key);
    println!("  main:     {}", package.main);
    println!("  package:  {}", package.full_path.display());
    println!("  module:   {}", module.package_path.display());
    println!("  size:     {} ({} bytes)", module.human_size, module.size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use depstats::{DepStats, MemoryRuntime};
    use std::sync::Arc;

    async fn sample_stats() -> DependencyStats {
        let runtime = MemoryRuntime::new("/app")
            .with_file("/app/node_modules/pkg/package.json", r#"{"name":"pkg","version":"1.0.0"}"#)
            .with_file("/app/node_modules/pkg/a.js", "a".repeat(1500))
            .with_file("/app/node_modules/pkg/b.js", "b".repeat(500));

        DepStats::new("/app")
            .runtime(Arc::new(runtime))
            .modules(["node_modules/pkg/a.js", "node_modules/pkg/b.js"])
            .analyze()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_package_rows() {
        let stats = sample_stats().await;
        let rows = package_rows(&stats);
        assert_eq!(
            rows,
            vec![PackageRow {
                key: "pkg@1.0.0".into(),
                main: "<unresolved>".into(),
                modules: 2,
                size: "2 kB".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_print_table_does_not_panic() {
        let stats = sample_stats().await;
        print_package_table(&stats, true);
        print_package_table(&DependencyStats::new(), false);
    }

    #[test]
    fn test_print_exclusions_counts_only_exclusions() {
        let diagnostics = vec![
            Diagnostic::NoOwningPackage {
                path: "/tmp/a.js".into(),
            },
            Diagnostic::DuplicatePackageKey {
                key: "x@1.0.0".into(),
                replaced: "/a/x".into(),
                by: "/b/x".into(),
            },
        ];
        assert_eq!(print_exclusions(&diagnostics), 1);
    }
}
