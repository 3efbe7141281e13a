//! Optional advisory-lock probe.
//!
//! Strengthens the size heuristic on filesystems with advisory locking: if another
//! process holds a lock on the file, treat it as still being written.
//!
//! Notes:
//! - Unix: flock(LOCK_EX | LOCK_NB) via fs2; writers that never lock are invisible here.
//! - Windows: LockFileEx; sharing violations on open are reported as contended too.
//! - The probe lock is released before returning.

use fs2::FileExt;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::trace;

/// Ok(true) if nobody else holds a lock on `path`, Ok(false) if the lock is contended.
pub fn probe_unlocked(path: &Path) -> io::Result<bool> {
    let file = match File::open(path) {
        Ok(f) => f,
        #[cfg(windows)]
        Err(e) if e.raw_os_error() == Some(32) => return Ok(false), // ERROR_SHARING_VIOLATION
        Err(e) => return Err(e),
    };

    match FileExt::try_lock_exclusive(&file) {
        Ok(()) => {
            let _ = FileExt::unlock(&file);
            trace!(path = %path.display(), "lock probe: free");
            Ok(true)
        }
        Err(e) if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
            trace!(path = %path.display(), "lock probe: contended");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
