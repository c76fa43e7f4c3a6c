use std::fmt;

/// Control input for a running countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    Pause,
    Resume,
    Stop,
    Exit,
}

impl TimerSignal {
    /// Keystroke mapping used by timer mode: p, r, s, e
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'p' => Some(TimerSignal::Pause),
            'r' => Some(TimerSignal::Resume),
            's' => Some(TimerSignal::Stop),
            'e' => Some(TimerSignal::Exit),
            _ => None,
        }
    }
}

/// Countdown lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Paused,
    Stopped,
    ExitedWithoutSaving,
    Completed,
}

impl TimerState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TimerState::Stopped | TimerState::ExitedWithoutSaving | TimerState::Completed
        )
    }

    /// Whether elapsed time is written back when the countdown ends this way
    pub fn persists(self) -> bool {
        matches!(self, TimerState::Stopped | TimerState::Completed)
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Stopped => "stopped",
            TimerState::ExitedWithoutSaving => "exited without saving",
            TimerState::Completed => "completed",
        };
        f.write_str(label)
    }
}
