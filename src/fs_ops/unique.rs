//! Collision-free destination naming.
//!
//! Policy:
//! - `folder/<name>` if nothing exists there.
//! - otherwise `folder/<nanos>_<n>_<name>` with a fresh timestamp per try and `n` counting from 1.
//!
//! Notes:
//! - Existence is checked without following symlinks, so a dangling link still counts as taken.
//! - This only inspects current filesystem state; a concurrent writer can still race the rename.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

fn taken(p: &Path) -> bool {
    fs::symlink_metadata(p).is_ok()
}

fn now_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}

/// "<nanos>_<counter>_<name>", preserving non-UTF8 names.
pub(crate) fn collision_name(nanos: u128, counter: u32, name: &OsStr) -> OsString {
    let mut out = OsString::from(format!("{nanos}_{counter}_"));
    out.push(name);
    out
}

/// Return a path inside `folder` for `name` that does not currently exist.
pub fn unique_destination(folder: &Path, name: &OsStr) -> PathBuf {
    let mut candidate = folder.join(name);
    let mut counter: u32 = 1;
    while taken(&candidate) {
        candidate = folder.join(collision_name(now_nanos(), counter, name));
        counter = counter.saturating_add(1);
    }
    if counter > 1 {
        trace!(name = ?name, dest = %candidate.display(), tries = counter - 1, "resolved name collision");
    }
    candidate
}
