//! Filesystem path resolution against a base directory.
//!
//! Resolution order (first hit wins):
//! 1. the URI as an absolute path, if it exists;
//! 2. joined to the configured base directory, if that exists;
//! 3. joined to the process working directory, if that exists;
//! 4. unresolved — the caller hands the renderer the original string, so a
//!    genuinely missing file fails visibly in the engine's output rather
//!    than silently vanishing here.

use super::Resolution;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a relative (or unrecognised-absolute) reference to a local file.
pub fn resolve_path(uri: &str, base_dir: &Path) -> Resolution {
    let direct = Path::new(uri);
    if direct.is_absolute() && direct.exists() {
        return Resolution::Resolved(direct.to_path_buf());
    }

    if let Some(found) = try_join(base_dir, uri) {
        debug!("Resolved {uri:?} under base dir → {}", found.display());
        return Resolution::Resolved(found);
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(found) = try_join(&cwd, uri) {
            debug!("Resolved {uri:?} under cwd → {}", found.display());
            return Resolution::Resolved(found);
        }
    }

    Resolution::Unresolved
}

/// Join and normalise; `None` when the joined path does not exist.
fn try_join(dir: &Path, uri: &str) -> Option<PathBuf> {
    let joined = dir.join(uri);
    if joined.exists() {
        // Canonicalise for a stable, symlink-free path; if that fails
        // (permissions, races) the joined path is still usable.
        Some(joined.canonicalize().unwrap_or(joined))
    } else {
        None
    }
}
