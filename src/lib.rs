//! Core library for `file_organizer`.
//!
//! Relocates files from a source tree into `<dest>/<Category>/` folders chosen by
//! extension, either in one pass (`scan_once`) or continuously (`WatchSession`).
//! Files still being written are skipped via a size-stability heuristic, name
//! collisions get a timestamped prefix, and the destination tree is never treated
//! as input.

pub mod classify;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod logging;
pub mod output;
pub mod scan;
pub mod shutdown;
pub mod utils;
pub mod watch;

pub use classify::{Category, CategoryRule, CategoryTable, classify};
pub use config::{Config, LogLevel, Mode};
pub use errors::{ErrorKind, OrganizerError};
pub use fs_ops::{MoveOutcome, MoveRequest, Mover, StabilityPolicy};
pub use scan::{ScanReport, scan_once};
pub use shutdown::Shutdown;
pub use watch::{WatchHandle, WatchOptions, WatchReport, WatchSession};
