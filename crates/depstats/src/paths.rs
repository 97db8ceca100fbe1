//! Path helpers: anchoring candidates at a base directory and expressing
//! absolute paths relative to one another.

use path_clean::PathClean;
use std::path::{Component, Path, PathBuf};

/// Anchor `path` at `base` and normalize `.` and `..` lexically.
///
/// Absolute inputs ignore `base`. No filesystem access happens here, so
/// symlinks are left untouched.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        base.join(path).clean()
    }
}

/// Express `to` relative to the directory `from`.
///
/// Both paths are expected to be absolute and clean. The result contains `..`
/// segments when `to` is not below `from`, and is empty when they are equal.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for component in &to[common..] {
        rel.push(component.as_os_str());
    }
    rel
}
