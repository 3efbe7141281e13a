//! Cooperative shutdown coordination.
//! An owned flag set by the Ctrl-C handler (or a test) so long-running work can exit early.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `request()` is safe to call from signal handlers.
//! - Clones share the same flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Granularity of interruptible sleeps.
const SLICE: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    flag: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a cooperative shutdown (idempotent).
    #[inline]
    pub fn request(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether a shutdown has been requested.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Sleep for `dur`, waking early if shutdown is requested.
    /// Returns false when the sleep was cut short. A `dur` too large to represent as a
    /// deadline sleeps until shutdown is requested.
    pub fn sleep(&self, dur: Duration) -> bool {
        let deadline = Instant::now().checked_add(dur);
        loop {
            if self.is_requested() {
                return false;
            }
            let slice = match deadline {
                Some(d) => {
                    let now = Instant::now();
                    if now >= d {
                        return true;
                    }
                    SLICE.min(d - now)
                }
                None => SLICE,
            };
            std::thread::sleep(slice);
        }
    }
}
