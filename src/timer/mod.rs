//! Pausable countdown over one task.
//!
//! A session runs as a single tokio task that waits on control signals and a
//! one-second interval. Signals are polled first, so pause/stop never queue
//! behind a tick. Stopping or completing writes the elapsed seconds back
//! through the update coordinator; exiting discards them.

pub mod session;
pub mod state;

pub use session::{CountdownHandle, CountdownSession, TimerReport};
pub use state::{TimerSignal, TimerState};
