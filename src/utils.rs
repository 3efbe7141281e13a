use std::fs;
use std::path::{Component, Path, PathBuf};

/// Best-effort canonical form of `path`.
/// - Existing paths are resolved with `dunce::canonicalize` (no `\\?\` prefixes on Windows).
/// - Missing paths are made absolute, lexically cleaned, and re-rooted on the canonical
///   form of their deepest existing ancestor.
pub fn normalize(path: &Path) -> PathBuf {
    if let Ok(real) = dunce::canonicalize(path) {
        return real;
    }
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let cleaned = lexical_clean(&abs);
    for anc in cleaned.ancestors().skip(1) {
        if let Ok(real) = dunce::canonicalize(anc) {
            // `anc` is a prefix of `cleaned` by construction
            if let Ok(rest) = cleaned.strip_prefix(anc) {
                return real.join(rest);
            }
        }
    }
    cleaned
}

/// Drop `.` components and fold `..` without touching the filesystem.
fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(comp);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// True if `path` is `root` or lies beneath it (component-wise).
/// Both sides should already be normalized.
pub fn is_within(root: &Path, path: &Path) -> bool {
    path.starts_with(root)
}

/// True if `path` currently names a regular file (symlinks are not followed).
pub fn is_regular_file(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}
