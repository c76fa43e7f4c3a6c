/// Desktop notifications
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

/// Send a notification when a countdown runs to the end
pub fn notify_countdown_complete(task_name: &str, minutes: u64) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{} ({} min)" with title "tasktally - Countdown complete""#,
            escape(task_name),
            minutes
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = (task_name, minutes);
    }
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape(r"a\b"), r"a\\b");
    }
}
