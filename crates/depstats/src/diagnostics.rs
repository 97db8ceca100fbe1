//! Non-fatal conditions reported while analyzing.
//!
//! The analyzer never logs through global state directly. It hands each
//! [`Diagnostic`] to an injected [`DiagnosticSink`]; the default sink forwards
//! to `tracing`, and [`RecordingSink`] collects them for inspection.

use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A recoverable condition encountered during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// The candidate path is not a loadable module; it was excluded.
    UnresolvableModule { path: PathBuf, reason: String },

    /// No `package.json` exists above the module; it was excluded.
    NoOwningPackage { path: PathBuf },

    /// Two package directories share a name and version. The later one
    /// replaced the earlier one in the result.
    DuplicatePackageKey {
        key: String,
        replaced: PathBuf,
        by: PathBuf,
    },
}

impl Diagnostic {
    /// Whether this diagnostic removed a module from the result.
    pub fn is_exclusion(&self) -> bool {
        matches!(
            self,
            Diagnostic::UnresolvableModule { .. } | Diagnostic::NoOwningPackage { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvableModule { path, reason } => write!(
                f,
                "Unable to find \"{}\", will exclude it from stats ({reason})",
                path.display()
            ),
            Diagnostic::NoOwningPackage { path } => write!(
                f,
                "Unable to find package of {}, will exclude it from stats",
                path.display()
            ),
            Diagnostic::DuplicatePackageKey { key, replaced, by } => write!(
                f,
                "Package key {key} at {} replaces the one at {}",
                by.display(),
                replaced.display()
            ),
        }
    }
}

/// Receiver for diagnostics emitted by the analyzer.
pub trait DiagnosticSink: Send + Sync + fmt::Debug {
    /// Handle one diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Remove and return everything reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::debug!("{diagnostic}");
        self.diagnostics.lock().push(diagnostic);
    }
}
