//! One-shot mode: walk the source tree once and relocate every eligible file.
//!
//! Traversal rules:
//! - the destination root's subtree is pruned
//! - with `recursive == false`, only direct children of the source root are visited
//! - anything inside the destination root is never input, even if reached another way
//! - directories and symlinks are never handed to the mover
//! - per-entry errors are logged and the walk continues; only an unreadable root is fatal

use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::OrganizerError;
use crate::fs_ops::{MoveOutcome, MoveRequest, Mover};
use crate::utils::{is_within, normalize};

/// Per-run counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Regular files considered
    pub seen: usize,
    pub moved: usize,
    /// Dry-run relocations reported
    pub planned: usize,
    pub unclassified: usize,
    pub failed: usize,
}

impl ScanReport {
    pub(crate) fn record(&mut self, result: &Result<MoveOutcome, OrganizerError>) {
        match result {
            Ok(MoveOutcome::Moved { .. }) => self.moved += 1,
            Ok(MoveOutcome::WouldMove { .. }) => self.planned += 1,
            Ok(MoveOutcome::Unclassified(_)) => self.unclassified += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Walk `source` depth-first and relocate eligible files into `dest`.
pub fn scan_once(
    source: &Path,
    dest: &Path,
    recursive: bool,
    dry_run: bool,
    mover: &Mover,
) -> Result<ScanReport, OrganizerError> {
    let root = normalize(source);
    let dest = normalize(dest);
    let mut report = ScanReport::default();

    let mut walker = WalkDir::new(&root).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }
    let mut it = walker.into_iter();

    while let Some(entry) = it.next() {
        if mover.shutdown().is_requested() {
            warn!("scan interrupted");
            return Err(OrganizerError::Interrupted);
        }

        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                let source = e.into_io_error().unwrap_or_else(|| std::io::Error::other("walk failed"));
                return Err(OrganizerError::SourceUnreadable {
                    path: root.clone(),
                    source,
                });
            }
            Err(e) => {
                let err = OrganizerError::from(e);
                warn!(error = %err, code = err.code(), kind = ?err.kind(), "Error accessing entry; skipping");
                continue;
            }
        };
        let path = entry.path();

        if entry.file_type().is_dir() {
            if entry.depth() > 0 && path == dest {
                debug!(path = %path.display(), "skipping destination subtree");
                it.skip_current_dir();
            }
            continue;
        }
        if is_within(&dest, path) {
            continue;
        }
        if !entry.file_type().is_file() {
            debug!(path = %path.display(), "not a regular file; skipping");
            continue;
        }

        report.seen += 1;
        let result = mover.relocate(&MoveRequest::new(path, &dest, dry_run));
        if let Err(e) = &result {
            if matches!(e, OrganizerError::Interrupted) {
                return Err(OrganizerError::Interrupted);
            }
            warn!(
                path = %path.display(),
                error = %e,
                code = e.code(),
                hint = e.hint().unwrap_or(""),
                "Failed to move file"
            );
        }
        report.record(&result);
    }

    info!(
        seen = report.seen,
        moved = report.moved,
        planned = report.planned,
        unclassified = report.unclassified,
        failed = report.failed,
        "scan finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_ops::StabilityPolicy;
    use crate::shutdown::Shutdown;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn mover() -> Mover {
        Mover::new(Shutdown::new()).with_stability(StabilityPolicy::new(Duration::from_millis(5), 2))
    }

    #[test]
    fn missing_root_is_fatal() {
        let td = tempdir().unwrap();
        let err = scan_once(&td.path().join("nope"), &td.path().join("out"), true, false, &mover())
            .unwrap_err();
        assert!(matches!(err, OrganizerError::SourceUnreadable { .. }));
    }

    #[test]
    fn interrupted_scan_stops() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("a.png"), b"x").unwrap();
        let m = mover();
        m.shutdown().request();
        let err = scan_once(td.path(), &td.path().join("out"), true, false, &m).unwrap_err();
        assert!(matches!(err, OrganizerError::Interrupted));
        assert!(td.path().join("a.png").exists());
    }

    #[test]
    fn non_recursive_ignores_subdirs() {
        let td = tempdir().unwrap();
        let sub = td.path().join("nested");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("deep.pdf"), b"x").unwrap();
        fs::write(td.path().join("top.pdf"), b"x").unwrap();
        let out = td.path().join("out");

        let report = scan_once(td.path(), &out, false, false, &mover()).unwrap();

        assert_eq!(report.moved, 1);
        assert!(out.join("Documents").join("top.pdf").exists());
        assert!(sub.join("deep.pdf").exists());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        // root ignores permission bits
        if unsafe { libc::geteuid() } == 0 {
            return;
        }
        let td = tempdir().unwrap();
        let locked = td.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("hidden.png"), b"x").unwrap();
        fs::write(td.path().join("open.png"), b"x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let out = td.path().join("out");

        let report = scan_once(td.path(), &out, true, false, &mover());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let report = report.unwrap();
        assert_eq!(report.moved, 1);
        assert!(out.join("Images").join("open.png").exists());
        assert!(locked.join("hidden.png").exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_left_alone() {
        let td = tempdir().unwrap();
        let target = td.path().join("real.txt");
        fs::write(&target, b"x").unwrap();
        let link = td.path().join("link.txt");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let out = td.path().join("out");

        let report = scan_once(td.path(), &out, true, false, &mover()).unwrap();

        assert_eq!(report.moved, 1);
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    }
}
