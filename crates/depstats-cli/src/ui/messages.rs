//! Status message functions for terminal output.

use owo_colors::OwoColorize;

fn colored() -> bool {
    console::colors_enabled_stderr()
}

/// Print a success message to stderr.
///
/// ```no_run
/// use depstats_cli::ui::success;
///
/// success("Analyzed 4 modules in 1 package");
/// ```
pub fn success(message: &str) {
    if colored() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {}", message);
    }
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if colored() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {}", message);
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if colored() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {}", message);
    }
}
