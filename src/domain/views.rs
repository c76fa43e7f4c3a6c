use super::enums::ItemStatus;
use super::record::Record;

/// Format accumulated seconds as "1 hour 2 minutes 5 seconds" (omits 0 values)
pub fn format_spent_time(total_seconds: u64) -> String {
    if total_seconds == 0 {
        return "0".to_string();
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let parts: Vec<String> = [(hours, "hour"), (minutes, "minute"), (seconds, "second")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| {
            if value > 1 {
                format!("{} {}s", value, unit)
            } else {
                format!("{} {}", value, unit)
            }
        })
        .collect();

    parts.join(" ")
}

/// Remaining "m:ss" shown while a countdown runs
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Keep only records with the given status (all records when `filter` is None)
pub fn filter_by_status<T: Record>(items: Vec<T>, filter: Option<ItemStatus>) -> Vec<T> {
    match filter {
        Some(status) => items.into_iter().filter(|item| item.status() == status).collect(),
        None => items,
    }
}

/// Count records that have not been started yet
pub fn count_left<T: Record>(items: &[T]) -> usize {
    items.iter().filter(|item| item.status().is_left()).count()
}

/// Listing footer: "Left tasks: N", or "No tasks found" for an empty collection
pub fn footer_text(noun: &str, left: usize, total: usize) -> String {
    if left == 0 && total == 0 {
        return format!("No {} found", noun);
    }
    format!("Left {}: {}", noun, left)
}
