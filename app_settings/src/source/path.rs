//! Identity resolution for file-backed sources.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};

/// Canonicalise `p` using platform-specific rules.
///
/// On Windows the [`dunce`](https://docs.rs/dunce/latest/dunce/) crate is
/// used to avoid introducing UNC prefixes in diagnostic messages.
fn canonicalise(p: &Utf8Path) -> io::Result<Utf8PathBuf> {
    #[cfg(windows)]
    let canonical = dunce::canonicalize(p)?;
    #[cfg(not(windows))]
    let canonical = std::fs::canonicalize(p)?;
    Utf8PathBuf::from_path_buf(canonical)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "canonical path is not UTF-8"))
}

/// Resolve the identity of the file at `path`.
///
/// Existing files resolve to their canonical path so that symlinks and
/// alternative spellings collapse to one identity. Missing files resolve to
/// their absolute path, falling back to `path` itself when the working
/// directory is unavailable.
pub(super) fn resolve_identity(path: &Utf8Path) -> Utf8PathBuf {
    if let Ok(canonical) = canonicalise(path) {
        return canonical;
    }
    std::path::absolute(path)
        .ok()
        .and_then(|absolute| Utf8PathBuf::from_path_buf(absolute).ok())
        .unwrap_or_else(|| path.to_owned())
}
