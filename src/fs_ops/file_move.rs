//! Single-file relocation.
//! classify -> wait for stability -> ensure category folder -> pick a free name -> rename.
//! Dry runs stop before any mutation and report the would-be destination.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::classify::{Category, CategoryTable};
use crate::config::Config;
use crate::errors::OrganizerError;
use crate::output as out;
use crate::shutdown::Shutdown;

use super::lock::probe_unlocked;
use super::stability::{StabilityPolicy, wait_until_stable};
use super::unique::unique_destination;

/// One relocation job; built per discovered file and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub source: PathBuf,
    pub dest_root: PathBuf,
    pub dry_run: bool,
}

impl MoveRequest {
    pub fn new(source: impl Into<PathBuf>, dest_root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            source: source.into(),
            dest_root: dest_root.into(),
            dry_run,
        }
    }
}

/// Successful result of `Mover::relocate`. Failures are `OrganizerError`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: PathBuf, to: PathBuf, category: Category },
    WouldMove { from: PathBuf, to: PathBuf, category: Category },
    /// Extension not in the table; nothing was touched.
    Unclassified(PathBuf),
}

impl MoveOutcome {
    /// Resolved destination, if any.
    pub fn destination(&self) -> Option<&Path> {
        match self {
            MoveOutcome::Moved { to, .. } | MoveOutcome::WouldMove { to, .. } => Some(to),
            MoveOutcome::Unclassified(_) => None,
        }
    }
}

/// Performs relocations with a fixed table and stability policy.
/// Cheap to clone; clones share the category table and shutdown flag.
#[derive(Debug, Clone)]
pub struct Mover {
    categories: Arc<CategoryTable>,
    stability: StabilityPolicy,
    lock_files: bool,
    shutdown: Shutdown,
}

impl Mover {
    pub fn new(shutdown: Shutdown) -> Self {
        Self {
            categories: Arc::new(CategoryTable::default()),
            stability: StabilityPolicy::default(),
            lock_files: false,
            shutdown,
        }
    }

    pub fn from_config(cfg: &Config, shutdown: Shutdown) -> Self {
        Self::new(shutdown)
            .with_stability(cfg.stability)
            .with_file_locks(cfg.lock_files)
    }

    pub fn with_stability(mut self, policy: StabilityPolicy) -> Self {
        self.stability = policy;
        self
    }

    pub fn with_file_locks(mut self, enabled: bool) -> Self {
        self.lock_files = enabled;
        self
    }

    pub fn with_categories(mut self, table: CategoryTable) -> Self {
        self.categories = Arc::new(table);
        self
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    /// Relocate `req.source` into `req.dest_root/<category>/`.
    pub fn relocate(&self, req: &MoveRequest) -> Result<MoveOutcome, OrganizerError> {
        let src = req.source.as_path();
        let Some(category) = self.categories.classify(src) else {
            debug!(src = %src.display(), "no category for extension; skipping");
            return Ok(MoveOutcome::Unclassified(src.to_path_buf()));
        };

        if self.shutdown.is_requested() {
            return Err(OrganizerError::Interrupted);
        }

        wait_until_stable(src, &self.stability, &self.shutdown)?;
        if self.lock_files {
            match probe_unlocked(src) {
                Ok(true) => {}
                Ok(false) => return Err(OrganizerError::StillChanging(src.to_path_buf())),
                Err(source) => {
                    return Err(OrganizerError::Unreadable {
                        path: src.to_path_buf(),
                        source,
                    });
                }
            }
        }

        let folder = req.dest_root.join(category.dir_name());
        if req.dry_run {
            debug!(action = "mkdir -p", path = %folder.display(), "dry-run");
        } else {
            fs::create_dir_all(&folder).map_err(|source| OrganizerError::CreateFolder {
                path: folder.clone(),
                source,
            })?;
        }

        let file_name = src
            .file_name()
            .ok_or_else(|| OrganizerError::MissingFileName(src.to_path_buf()))?;
        let dest = unique_destination(&folder, file_name);

        if req.dry_run {
            info!(src = %src.display(), dest = %dest.display(), %category, "dry-run: would move file");
            out::print_relocation(src, &dest, true);
            return Ok(MoveOutcome::WouldMove {
                from: src.to_path_buf(),
                to: dest,
                category,
            });
        }

        if let Err(source) = fs::rename(src, &dest) {
            let err = OrganizerError::Rename {
                from: src.to_path_buf(),
                to: dest,
                source,
            };
            warn!(error = %err, hint = err.hint().unwrap_or(""), "rename failed; file left in place");
            return Err(err);
        }

        info!(src = %src.display(), dest = %dest.display(), %category, "Renamed file atomically");
        out::print_relocation(src, &dest, false);
        Ok(MoveOutcome::Moved {
            from: src.to_path_buf(),
            to: dest,
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::time::Duration;

    fn quick_mover() -> Mover {
        Mover::new(Shutdown::new()).with_stability(StabilityPolicy::new(Duration::from_millis(10), 2))
    }

    #[test]
    fn custom_table_replaces_builtin_rules() {
        use crate::classify::CategoryRule;

        let temp = assert_fs::TempDir::new().unwrap();
        let raw = temp.child("shot.cr2");
        raw.write_str("raw").unwrap();
        let png = temp.child("logo.png");
        png.write_str("png").unwrap();
        let dest_root = temp.child("out");

        let table = CategoryTable::from_rules(&[CategoryRule {
            extension: "cr2",
            category: Category::Images,
        }]);
        let mover = quick_mover().with_categories(table);

        let moved = mover
            .relocate(&MoveRequest::new(raw.path(), dest_root.path(), false))
            .unwrap();
        assert!(matches!(moved, MoveOutcome::Moved { category: Category::Images, .. }));
        let skipped = mover
            .relocate(&MoveRequest::new(png.path(), dest_root.path(), false))
            .unwrap();
        assert!(matches!(skipped, MoveOutcome::Unclassified(_)));
        assert!(png.path().exists());
    }

    #[test]
    fn moves_into_category_folder() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("in/a.png");
        src.write_str("png").unwrap();
        let dest_root = temp.child("out");

        let outcome = quick_mover()
            .relocate(&MoveRequest::new(src.path(), dest_root.path(), false))
            .unwrap();

        let expected = dest_root.path().join("Images").join("a.png");
        assert_eq!(outcome.destination(), Some(expected.as_path()));
        assert!(expected.exists());
        assert!(!src.path().exists());
    }

    #[test]
    fn unclassified_touches_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("c.exe");
        src.write_str("mz").unwrap();
        let dest_root = temp.child("out");

        let outcome = quick_mover()
            .relocate(&MoveRequest::new(src.path(), dest_root.path(), false))
            .unwrap();

        assert_eq!(outcome, MoveOutcome::Unclassified(src.path().to_path_buf()));
        assert!(src.path().exists());
        assert!(!dest_root.path().exists());
    }

    #[test]
    fn vanished_source_is_stability_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = quick_mover()
            .relocate(&MoveRequest::new(temp.path().join("gone.pdf"), temp.path().join("out"), false))
            .unwrap_err();
        assert!(matches!(err, OrganizerError::Unreadable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn folder_creation_failure_is_reported() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("doc.pdf");
        src.write_str("pdf").unwrap();
        // A regular file where the destination root should be.
        let blocker = temp.child("out");
        blocker.write_str("not a dir").unwrap();

        let err = quick_mover()
            .relocate(&MoveRequest::new(src.path(), blocker.path(), false))
            .unwrap_err();
        assert!(matches!(err, OrganizerError::CreateFolder { .. }));
        assert!(src.path().exists());
    }
}
