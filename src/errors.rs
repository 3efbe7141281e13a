//! Typed error definitions for file_organizer.
//! Every variant belongs to one of four families (setup, traversal, stability, move)
//! so callers can decide between aborting and logging-and-continuing.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fs_ops::io_hint;

/// Broad failure family; only `Setup` is fatal to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Setup,
    Traversal,
    Stability,
    Move,
    Interrupted,
}

#[derive(Debug, Error)]
pub enum OrganizerError {
    #[error("Source directory does not exist: {0}")]
    SourceMissing(PathBuf),

    #[error("Source path is not a directory: {0}")]
    SourceNotDirectory(PathBuf),

    #[error("Cannot create destination directory {path}: {source}")]
    DestinationUncreatable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Destination path exists but is not a directory: {0}")]
    DestinationNotDirectory(PathBuf),

    #[error("Source and destination resolve to the same directory: {0}")]
    SameSourceAndDest(PathBuf),

    #[error("Invalid mode '{0}'. Use 'once' or 'watch'")]
    InvalidMode(String),

    #[error("Failed to create watcher: {0}")]
    WatcherInit(#[source] notify::Error),

    #[error("Failed to watch directory {path}: {source}")]
    WatchSubscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("Cannot read source directory {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error accessing {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("File {0} is still changing")]
    StillChanging(PathBuf),

    #[error("File {path} became unreadable while checking stability: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Source file missing a file name: {0}")]
    MissingFileName(PathBuf),

    #[error("Error creating folder {path}: {source}")]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to move file {from} -> {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl From<walkdir::Error> for OrganizerError {
    fn from(source: walkdir::Error) -> Self {
        let path = source.path().map(PathBuf::from).unwrap_or_default();
        OrganizerError::Walk { path, source }
    }
}

impl OrganizerError {
    pub fn kind(&self) -> ErrorKind {
        use OrganizerError::*;
        match self {
            SourceMissing(_)
            | SourceNotDirectory(_)
            | DestinationUncreatable { .. }
            | DestinationNotDirectory(_)
            | SameSourceAndDest(_)
            | InvalidMode(_)
            | WatcherInit(_)
            | WatchSubscribe { .. }
            | SourceUnreadable { .. } => ErrorKind::Setup,
            Walk { .. } => ErrorKind::Traversal,
            StillChanging(_) | Unreadable { .. } => ErrorKind::Stability,
            MissingFileName(_) | CreateFolder { .. } | Rename { .. } => ErrorKind::Move,
            Interrupted => ErrorKind::Interrupted,
        }
    }

    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        use OrganizerError::*;
        match self {
            SourceMissing(_) => 10,
            SourceNotDirectory(_) => 11,
            DestinationUncreatable { .. } => 12,
            DestinationNotDirectory(_) => 13,
            SameSourceAndDest(_) => 14,
            InvalidMode(_) => 15,
            WatcherInit(_) => 16,
            WatchSubscribe { .. } => 17,
            SourceUnreadable { .. } => 18,
            Walk { .. } => 20,
            StillChanging(_) => 30,
            Unreadable { .. } => 31,
            MissingFileName(_) => 40,
            CreateFolder { .. } => 41,
            Rename { .. } => 42,
            Interrupted => 130,
        }
    }

    /// Short actionable hint for I/O-backed failures.
    pub fn hint(&self) -> Option<&'static str> {
        use OrganizerError::*;
        match self {
            DestinationUncreatable { source, .. }
            | SourceUnreadable { source, .. }
            | Unreadable { source, .. }
            | CreateFolder { source, .. }
            | Rename { source, .. } => io_hint(source),
            Walk { source, .. } => source.io_error().and_then(io_hint),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(OrganizerError::SourceMissing("x".into()).kind(), ErrorKind::Setup);
        assert_eq!(OrganizerError::StillChanging("x".into()).kind(), ErrorKind::Stability);
        let rename = OrganizerError::Rename {
            from: "a".into(),
            to: "b".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(rename.kind(), ErrorKind::Move);
        assert_eq!(OrganizerError::Interrupted.kind(), ErrorKind::Interrupted);
    }

    #[test]
    fn unreadable_subdirectory_is_traversal() {
        let td = tempfile::tempdir().unwrap();
        let missing = td.path().join("gone");
        let walk_err = walkdir::WalkDir::new(&missing).into_iter().next().unwrap().unwrap_err();
        let e = OrganizerError::from(walk_err);
        assert_eq!(e.kind(), ErrorKind::Traversal);
        assert_eq!(e.code(), 20);
        assert!(e.hint().unwrap().contains("not found"));
        assert!(e.to_string().contains("gone"));
    }

    #[test]
    fn rename_not_found_has_hint() {
        let e = OrganizerError::Rename {
            from: "a".into(),
            to: "b".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(e.hint().is_some());
        assert!(e.to_string().starts_with("Failed to move file"));
    }
}
