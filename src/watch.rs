//! Continuous mode: relocate files as change notifications arrive.
//!
//! Design:
//! - `WatchSession::open` creates the OS watcher and subscribes directories up front. Each
//!   directory gets its own non-recursive subscription; the destination subtree is never subscribed.
//! - Subscriptions are a one-time snapshot unless `follow_new_dirs` is set on a recursive
//!   session, in which case directories created later are subscribed as their create events
//!   arrive. A non-recursive session only ever watches the source root.
//! - `run` processes events sequentially on the calling thread until shutdown is requested;
//!   `spawn` does the same on a dedicated thread and returns a joinable handle.
//! - Dropping the session drops the watcher, which releases the OS handles.

use notify::event::{AccessKind, AccessMode, ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};
use walkdir::WalkDir;

use crate::errors::OrganizerError;
use crate::fs_ops::{MoveRequest, Mover};
use crate::scan::ScanReport;
use crate::shutdown::Shutdown;
use crate::utils::{is_regular_file, is_within, normalize};

/// Upper bound on how long the loop waits before re-checking the shutdown flag.
const POLL: Duration = Duration::from_millis(100);

/// Per-session behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchOptions {
    pub dry_run: bool,
    pub follow_new_dirs: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WatchReport {
    /// Notifications received (of any kind)
    pub events: usize,
    /// Errors reported by the notification source
    pub source_errors: usize,
    pub files: ScanReport,
}

/// Owned watch state: the OS watcher, its event channel, and the subscribed directories.
pub struct WatchSession {
    watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    watched: BTreeSet<PathBuf>,
    source: PathBuf,
    dest: PathBuf,
    recursive: bool,
}

/// The path an event is about, if it signals a created or written entry.
pub fn created_or_written(event: &Event) -> Option<&Path> {
    let path = match event.kind {
        EventKind::Create(_)
        | EventKind::Modify(ModifyKind::Data(_))
        | EventKind::Modify(ModifyKind::Any)
        | EventKind::Modify(ModifyKind::Name(RenameMode::To))
        | EventKind::Access(AccessKind::Close(AccessMode::Write)) => event.paths.first(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => event.paths.last(),
        _ => None,
    };
    path.map(PathBuf::as_path)
}

fn is_dir_creation(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(RenameMode::To | RenameMode::Both))
    )
}

impl WatchSession {
    /// Create the watcher and subscribe `source` (and, when `recursive`, every
    /// subdirectory outside `dest`). Any subscription failure is fatal.
    pub fn open(source: &Path, dest: &Path, recursive: bool) -> Result<Self, OrganizerError> {
        let (tx, events) = channel();
        let watcher = notify::recommended_watcher(tx).map_err(OrganizerError::WatcherInit)?;
        let mut session = Self {
            watcher,
            events,
            watched: BTreeSet::new(),
            source: normalize(source),
            dest: normalize(dest),
            recursive,
        };

        if recursive {
            let root = session.source.clone();
            session.subscribe_tree(&root)?;
        } else {
            let root = session.source.clone();
            session.subscribe(&root)?;
        }
        info!(
            source = %session.source.display(),
            directories = session.watched.len(),
            recursive,
            "watch session ready"
        );
        Ok(session)
    }

    /// Whether subdirectories are watched.
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Directories currently subscribed.
    pub fn watched(&self) -> &BTreeSet<PathBuf> {
        &self.watched
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    fn subscribe(&mut self, dir: &Path) -> Result<(), OrganizerError> {
        if self.watched.contains(dir) {
            return Ok(());
        }
        self.watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| OrganizerError::WatchSubscribe {
                path: dir.to_path_buf(),
                source,
            })?;
        debug!(path = %dir.display(), "subscribed");
        self.watched.insert(dir.to_path_buf());
        Ok(())
    }

    /// Subscribe `root` and every directory beneath it, pruning the destination subtree.
    /// An unreadable `root` is an error; unreadable entries below it are logged and skipped.
    fn subscribe_tree(&mut self, root: &Path) -> Result<usize, OrganizerError> {
        let before = self.watched.len();
        let mut it = WalkDir::new(root).follow_links(false).into_iter();
        while let Some(entry) = it.next() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) if e.depth() == 0 => {
                    let source = e.into_io_error().unwrap_or_else(|| std::io::Error::other("walk failed"));
                    return Err(OrganizerError::SourceUnreadable {
                        path: root.to_path_buf(),
                        source,
                    });
                }
                Err(e) => {
                    let err = OrganizerError::from(e);
                    warn!(error = %err, code = err.code(), "Error accessing directory; not watched");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if is_within(&self.dest, entry.path()) {
                it.skip_current_dir();
                continue;
            }
            self.subscribe(entry.path())?;
        }
        Ok(self.watched.len() - before)
    }

    /// Process events until `mover.shutdown()` is requested or the channel closes.
    pub fn run(&mut self, mover: &Mover, opts: WatchOptions) -> WatchReport {
        let shutdown = mover.shutdown().clone();
        let mut report = WatchReport::default();
        while !shutdown.is_requested() {
            match self.events.recv_timeout(POLL) {
                Ok(Ok(event)) => {
                    report.events += 1;
                    self.handle_event(&event, mover, opts, &mut report);
                }
                Ok(Err(e)) => {
                    report.source_errors += 1;
                    warn!(error = %e, "Watcher error");
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("notification channel closed");
                    break;
                }
            }
        }
        info!(
            events = report.events,
            moved = report.files.moved,
            failed = report.files.failed,
            "watch loop stopped"
        );
        report
    }

    /// Run the event loop on its own thread.
    pub fn spawn(mut self, mover: Mover, opts: WatchOptions) -> WatchHandle {
        let shutdown = mover.shutdown().clone();
        let thread = thread::spawn(move || self.run(&mover, opts));
        WatchHandle { shutdown, thread }
    }

    fn handle_event(&mut self, event: &Event, mover: &Mover, opts: WatchOptions, report: &mut WatchReport) {
        let Some(path) = created_or_written(event) else {
            trace!(kind = ?event.kind, "ignored event kind");
            return;
        };
        if is_within(&self.dest, path) {
            trace!(path = %path.display(), "event inside destination; ignored");
            return;
        }

        let meta = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(_) => {
                trace!(path = %path.display(), "entry vanished before handling");
                return;
            }
        };
        if meta.file_type().is_dir() {
            if opts.follow_new_dirs && self.recursive && is_dir_creation(event) {
                match self.subscribe_tree(path) {
                    Ok(n) if n > 0 => info!(path = %path.display(), added = n, "watching new directory"),
                    Ok(_) => {}
                    Err(e) => warn!(path = %path.display(), error = %e, "could not watch new directory"),
                }
            }
            return;
        }
        if !is_regular_file(path) {
            return;
        }

        let result = mover.relocate(&MoveRequest::new(path, &self.dest, opts.dry_run));
        if let Err(e) = &result {
            warn!(
                path = %path.display(),
                error = %e,
                code = e.code(),
                hint = e.hint().unwrap_or(""),
                "Failed to move file"
            );
        }
        report.files.seen += 1;
        report.files.record(&result);
    }
}

/// Joinable handle for a spawned watch loop.
pub struct WatchHandle {
    shutdown: Shutdown,
    thread: JoinHandle<WatchReport>,
}

impl WatchHandle {
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block until the loop exits (after a shutdown request).
    pub fn join(self) -> WatchReport {
        self.thread.join().unwrap_or_else(|_| {
            error!("watch loop panicked");
            WatchReport::default()
        })
    }

    /// Request shutdown and wait for the loop to finish.
    pub fn stop(self) -> WatchReport {
        self.shutdown.request();
        self.join()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};

    fn ev(kind: EventKind, paths: &[&str]) -> Event {
        let mut e = Event::new(kind);
        for p in paths {
            e = e.add_path(PathBuf::from(p));
        }
        e
    }

    #[test]
    fn create_and_write_are_relevant() {
        let c = ev(EventKind::Create(CreateKind::File), &["/s/a.png"]);
        assert_eq!(created_or_written(&c), Some(Path::new("/s/a.png")));
        let w = ev(EventKind::Modify(ModifyKind::Data(DataChange::Content)), &["/s/b.pdf"]);
        assert_eq!(created_or_written(&w), Some(Path::new("/s/b.pdf")));
        let closed = ev(EventKind::Access(AccessKind::Close(AccessMode::Write)), &["/s/c.mp3"]);
        assert!(created_or_written(&closed).is_some());
    }

    #[test]
    fn rename_uses_new_name() {
        let r = ev(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["/s/old.part", "/s/new.mp4"],
        );
        assert_eq!(created_or_written(&r), Some(Path::new("/s/new.mp4")));
        let from = ev(EventKind::Modify(ModifyKind::Name(RenameMode::From)), &["/s/x.zip"]);
        assert_eq!(created_or_written(&from), None);
    }

    #[test]
    fn removals_and_metadata_are_ignored() {
        let rm = ev(EventKind::Remove(RemoveKind::File), &["/s/a.png"]);
        assert_eq!(created_or_written(&rm), None);
        let md = ev(EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)), &["/s/a.png"]);
        assert_eq!(created_or_written(&md), None);
        let empty = ev(EventKind::Create(CreateKind::File), &[]);
        assert_eq!(created_or_written(&empty), None);
    }
}
