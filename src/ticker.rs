use std::time::Duration;

/// Countdown resolution
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// How long timer mode waits for a keystroke before checking the countdown state
pub const INPUT_POLL_MS: u64 = 250;

pub fn input_poll_duration() -> Duration {
    Duration::from_millis(INPUT_POLL_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_poll_is_shorter_than_a_tick() {
        assert_eq!(input_poll_duration(), Duration::from_millis(250));
        assert!(input_poll_duration() < COUNTDOWN_TICK);
    }
}
