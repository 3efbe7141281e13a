//! Filesystem operations: stability gating, naming and relocation.

mod file_move;
mod helpers;
mod lock;
mod stability;
mod unique;

pub use file_move::{MoveOutcome, MoveRequest, Mover};
pub use helpers::io_hint;
pub use lock::probe_unlocked;
pub use stability::{DEFAULT_ATTEMPTS, DEFAULT_INTERVAL, StabilityPolicy, wait_until_stable};
pub use unique::unique_destination;
