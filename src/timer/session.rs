use super::state::{TimerSignal, TimerState};
use crate::domain::{format_clock, Task};
use crate::error::{StoreError, StoreResult};
use crate::service::UpdateCoordinator;
use crate::ticker::COUNTDOWN_TICK;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// How a countdown ended
#[derive(Debug)]
pub struct TimerReport {
    pub outcome: TimerState,
    pub elapsed_secs: u64,
    /// Set when the elapsed time could not be written back
    pub save_error: Option<StoreError>,
}

/// A countdown over one task, not yet started
pub struct CountdownSession {
    task: Task,
    duration_secs: u64,
    coordinator: Arc<UpdateCoordinator>,
}

impl CountdownSession {
    pub fn new(task: Task, minutes: u64, coordinator: Arc<UpdateCoordinator>) -> StoreResult<Self> {
        if minutes == 0 {
            return Err(StoreError::Validation(
                "countdown length must be at least 1 minute".to_string(),
            ));
        }
        Ok(Self {
            task,
            duration_secs: minutes.saturating_mul(60),
            coordinator,
        })
    }

    /// Start the countdown loop on `runtime`
    pub fn spawn(self, runtime: &Handle) -> CountdownHandle {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(TimerState::Running);

        let countdown = Countdown {
            task: self.task,
            duration_secs: self.duration_secs,
            elapsed_secs: 0,
            state: TimerState::Running,
            coordinator: self.coordinator,
            progress: progress_tx,
            state_tx,
        };
        let join = runtime.spawn(countdown.run(signal_rx));

        CountdownHandle {
            signals: signal_tx,
            state: state_rx,
            progress: Some(progress_rx),
            join,
        }
    }
}

/// Caller side of a running countdown
pub struct CountdownHandle {
    signals: UnboundedSender<TimerSignal>,
    state: watch::Receiver<TimerState>,
    progress: Option<UnboundedReceiver<String>>,
    join: JoinHandle<TimerReport>,
}

impl CountdownHandle {
    /// Deliver a control signal; false once the countdown has ended
    pub fn send(&self, signal: TimerSignal) -> bool {
        self.signals.send(signal).is_ok()
    }

    pub fn state(&self) -> TimerState {
        *self.state.borrow()
    }

    pub fn is_done(&self) -> bool {
        self.state().is_terminal()
    }

    /// Progress and notice lines; can be taken once
    pub fn take_progress(&mut self) -> Option<UnboundedReceiver<String>> {
        self.progress.take()
    }

    pub async fn wait(self) -> Result<TimerReport, JoinError> {
        self.join.await
    }
}

struct Countdown {
    task: Task,
    duration_secs: u64,
    elapsed_secs: u64,
    state: TimerState,
    coordinator: Arc<UpdateCoordinator>,
    progress: UnboundedSender<String>,
    state_tx: watch::Sender<TimerState>,
}

impl Countdown {
    async fn run(mut self, mut signals: UnboundedReceiver<TimerSignal>) -> TimerReport {
        let mut ticker = interval_at(Instant::now() + COUNTDOWN_TICK, COUNTDOWN_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(task_id = self.task.id, seconds = self.duration_secs, "countdown started");

        loop {
            tokio::select! {
                biased;

                signal = signals.recv() => {
                    match signal {
                        Some(TimerSignal::Pause) => self.pause(),
                        Some(TimerSignal::Resume) => self.resume(),
                        Some(TimerSignal::Stop) => return self.finish(TimerState::Stopped),
                        // A dropped handle cannot resume us
                        Some(TimerSignal::Exit) | None => {
                            return self.finish(TimerState::ExitedWithoutSaving)
                        }
                    }
                }

                _ = ticker.tick() => {
                    if self.state == TimerState::Paused {
                        continue;
                    }

                    self.elapsed_secs += 1;
                    let remaining = self.duration_secs.saturating_sub(self.elapsed_secs);
                    self.emit(format!(
                        "Task --> \"{}\": {}",
                        self.task.name,
                        format_clock(remaining)
                    ));

                    if remaining == 0 {
                        return self.finish(TimerState::Completed);
                    }
                }
            }
        }
    }

    fn pause(&mut self) {
        if self.state != TimerState::Running {
            return;
        }
        self.set_state(TimerState::Paused);
        self.emit("Countdown paused. Type (r)esume to continue.".to_string());
    }

    fn resume(&mut self) {
        if self.state != TimerState::Paused {
            return;
        }
        self.set_state(TimerState::Running);
        self.emit("Countdown resumed.".to_string());
    }

    fn finish(self, outcome: TimerState) -> TimerReport {
        let save_error = if outcome.persists() {
            self.coordinator
                .record_elapsed_time(self.task.id, self.task.project_id, self.elapsed_secs)
                .err()
        } else {
            None
        };

        if let Some(e) = &save_error {
            warn!(task_id = self.task.id, "could not record elapsed time: {}", e);
        }

        let notice = match outcome {
            TimerState::Completed => {
                format!("Countdown complete for the task --> \"{}\".", self.task.name)
            }
            TimerState::Stopped => {
                format!("Countdown stopped early for the task --> \"{}\".", self.task.name)
            }
            _ => format!("Countdown session for task --> \"{}\" ignored.", self.task.name),
        };
        self.emit(notice);

        debug!(task_id = self.task.id, elapsed = self.elapsed_secs, %outcome, "countdown finished");
        self.state_tx.send_replace(outcome);

        TimerReport {
            outcome,
            elapsed_secs: self.elapsed_secs,
            save_error,
        }
    }

    fn set_state(&mut self, state: TimerState) {
        debug!(task_id = self.task.id, from = %self.state, to = %state, "countdown state");
        self.state = state;
        self.state_tx.send_replace(state);
    }

    fn emit(&self, line: String) {
        // The display may already be gone
        let _ = self.progress.send(line);
    }
}
