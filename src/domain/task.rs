use super::enums::ItemStatus;
use super::record::Record;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A task inside one project; its id is unique only within that project's file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub status: ItemStatus,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
    #[serde(default)]
    pub total_spent_time: u64,
    /// Owning project, set once at creation
    pub project_id: u64,
}

impl Task {
    pub fn new(id: u64, project_id: u64, name: String, now: DateTime<Local>) -> Self {
        Self {
            id,
            name,
            status: ItemStatus::Todo,
            created_at: now,
            updated_at: now,
            total_spent_time: 0,
            project_id,
        }
    }
}

impl Record for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn status(&self) -> ItemStatus {
        self.status
    }

    fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
    }

    fn total_spent_time(&self) -> u64 {
        self.total_spent_time
    }

    fn set_total_spent_time(&mut self, seconds: u64) {
        self.total_spent_time = seconds;
    }

    fn touch(&mut self, now: DateTime<Local>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new() {
        let task = Task::new(2, 9, "Write intro".to_string(), Local::now());
        assert_eq!(task.id, 2);
        assert_eq!(task.project_id, 9);
        assert_eq!(task.status, ItemStatus::Todo);
        assert_eq!(task.total_spent_time, 0);
    }

    #[test]
    fn test_task_json_roundtrip_keeps_project() {
        let task = Task::new(1, 4, "Draft".to_string(), Local::now());
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"projectId\":4"));
        assert!(json.contains("\"totalSpentTime\":0"));

        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn test_task_accumulate_in_progress_stays() {
        let mut task = Task::new(1, 1, "Draft".to_string(), Local::now());
        task.status = ItemStatus::InProgress;
        let before = task.updated_at;
        task.accumulate(30, Local::now());
        assert_eq!(task.status, ItemStatus::InProgress);
        assert_eq!(task.total_spent_time, 30);
        assert_eq!(task.updated_at, before);
    }
}
