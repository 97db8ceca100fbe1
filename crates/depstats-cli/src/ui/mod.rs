//! Terminal output helpers.
//!
//! Status messages go to stderr; results (tables, JSON) go to stdout so they
//! can be piped. Colors follow `console`'s global switches, which
//! [`init_colors`] sets from `--no-color` and the environment.
//!
//! # Examples
//!
//! ```no_run
//! use depstats_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Analyzed 12 modules");
//! ui::warning("Unable to find package of /tmp/x.js, will exclude it from stats");
//! ```

mod format;
mod messages;

pub use format::{PackageRow, package_rows, print_exclusions, print_owner, print_package_table};
pub use messages::{info, success, warning};

/// Check if color output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` enables them in non-TTY
/// contexts, otherwise stderr must be attended.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support. Call once, early in `main`.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}
