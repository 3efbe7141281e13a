//! Write-in-progress detection.
//!
//! A file is considered stable once its byte size is unchanged across one polling
//! interval. This is a heuristic, not a lock: the file may resume changing between
//! the last poll and the rename.

use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::trace;

use crate::errors::OrganizerError;
use crate::shutdown::Shutdown;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_ATTEMPTS: u32 = 5;

/// Polling parameters. Worst case latency is `interval * max_attempts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilityPolicy {
    pub interval: Duration,
    /// Number of re-reads after the initial size read; values below 1 are treated as 1.
    pub max_attempts: u32,
}

impl Default for StabilityPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl StabilityPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self { interval, max_attempts }
    }

    pub fn worst_case(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts.max(1))
    }
}

fn current_size(path: &Path) -> Result<u64, OrganizerError> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| OrganizerError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
}

/// Block until `path` stops growing, returning its final size.
///
/// - read size, sleep `interval`, read again; equal -> stable
/// - otherwise repeat, up to `max_attempts` re-reads, then `StillChanging`
/// - any failed read -> `Unreadable` immediately
/// - a shutdown request during a sleep -> `Interrupted`
pub fn wait_until_stable(
    path: &Path,
    policy: &StabilityPolicy,
    shutdown: &Shutdown,
) -> Result<u64, OrganizerError> {
    let mut last = current_size(path)?;
    for attempt in 1..=policy.max_attempts.max(1) {
        if !shutdown.sleep(policy.interval) {
            return Err(OrganizerError::Interrupted);
        }
        let size = current_size(path)?;
        if size == last {
            trace!(path = %path.display(), size, attempt, "size stable");
            return Ok(size);
        }
        trace!(path = %path.display(), before = last, after = size, attempt, "size still changing");
        last = size;
    }
    Err(OrganizerError::StillChanging(path.to_path_buf()))
}
