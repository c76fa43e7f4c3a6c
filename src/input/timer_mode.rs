use crate::notifications;
use crate::ticker::input_poll_duration;
use crate::timer::{CountdownSession, TimerReport, TimerSignal, TimerState};
use anyhow::Result;
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::io;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedReceiver;

/// Keeps the terminal in raw mode while alive
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Map a keystroke to a countdown control; Ctrl-C leaves without saving
pub fn signal_for_key(key: KeyEvent) -> Option<TimerSignal> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TimerSignal::Exit)
        }
        KeyCode::Char(c) => TimerSignal::from_key(c),
        _ => None,
    }
}

/// Rewrite the current terminal line with each progress message
async fn relay_progress(mut progress: UnboundedReceiver<String>) {
    let mut stdout = io::stdout();
    while let Some(line) = progress.recv().await {
        let _ = execute!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(line));
    }
}

/// Run a countdown in the foreground, feeding it keystrokes until it ends
pub fn run_countdown(
    runtime: &Runtime,
    session: CountdownSession,
    task_name: &str,
    minutes: u64,
) -> Result<TimerReport> {
    println!("Controls: type (p)ause, (r)esume, (s)top, or (e)xit to control the countdown.");

    let mut handle = session.spawn(runtime.handle());
    let relay = handle.take_progress().map(|progress| runtime.spawn(relay_progress(progress)));

    {
        let _raw = RawModeGuard::enable()?;
        while !handle.is_done() {
            if !event::poll(input_poll_duration())? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(signal) = signal_for_key(key) {
                    handle.send(signal);
                }
            }
        }
    }

    let report = runtime.block_on(handle.wait())?;
    if let Some(relay) = relay {
        runtime.block_on(relay)?;
    }
    println!();

    if report.outcome == TimerState::Completed {
        notifications::notify_countdown_complete(task_name, minutes);
    }
    Ok(report)
}
