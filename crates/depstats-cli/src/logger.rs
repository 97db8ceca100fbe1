//! Logging setup for the depstats CLI.
//!
//! Builds a `tracing` subscriber from the global flags:
//!
//! - `--verbose`: debug level for depstats crates
//! - `--quiet`: errors only
//! - otherwise `RUST_LOG`, falling back to info level
//!
//! # Example
//!
//! ```rust,no_run
//! use depstats_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("Analyzing modules");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "depstats=debug,depstats_cli=debug";
const QUIET_FILTER: &str = "depstats=error,depstats_cli=error";
const DEFAULT_FILTER: &str = "depstats=info,depstats_cli=info";

/// Initialize the global tracing subscriber.
///
/// Call once, before any logging. `verbose` wins over `quiet`; clap already
/// rejects both together.
///
/// # Examples
///
/// ```rust,no_run
/// use depstats_cli::logger::init_logger;
///
/// // Debug logging without colors
/// init_logger(true, false, true);
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the subscriber with an explicit filter.
///
/// ```rust,no_run
/// use depstats_cli::logger::init_logger_with_filter;
/// use tracing_subscriber::EnvFilter;
///
/// init_logger_with_filter(EnvFilter::new("depstats=trace"), false);
/// ```
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
