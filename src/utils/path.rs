//! Filesystem path normalization.

use std::path::{Path, PathBuf};

/// Normalize a path to absolute form.
///
/// Canonicalizes when the path exists; otherwise joins a relative path onto
/// the current directory.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a user-supplied path against cwd, then against `fallback_dir`.
///
/// `quire toc posts/a.md` works both from the site root and with the path
/// given relative to the content directory.
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if path.exists() {
        return normalize_path(path);
    }
    normalize_path(&fallback_dir.join(path))
}
