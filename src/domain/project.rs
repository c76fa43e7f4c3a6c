use super::enums::ItemStatus;
use super::record::Record;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A project groups tasks and aggregates their focused time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub status: ItemStatus,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
    /// Sum of every elapsed-time delta applied to this project's tasks
    #[serde(default)]
    pub total_spent_time: u64,
    /// Mirror of the number of tasks stored for this project
    #[serde(default)]
    pub task_count: u64,
}

impl Project {
    pub fn new(id: u64, name: String, now: DateTime<Local>) -> Self {
        Self {
            id,
            name,
            status: ItemStatus::Todo,
            created_at: now,
            updated_at: now,
            total_spent_time: 0,
            task_count: 0,
        }
    }
}

impl Record for Project {
    const KIND: &'static str = "project";

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
    fn test_project_new() {
        let now = Local::now();
        let project = Project::new(3, "Thesis".to_string(), now);
        assert_eq!(project.id, 3);
        assert_eq!(project.status, ItemStatus::Todo);
        assert_eq!(project.created_at, now);
        assert_eq!(project.updated_at, now);
        assert_eq!(project.total_spent_time, 0);
        assert_eq!(project.task_count, 0);
    }

    #[test]
    fn test_project_json_field_names() {
        let project = Project::new(1, "Garden".to_string(), Local::now());
        let value = serde_json::to_value(&project).unwrap();
        let object = value.as_object().unwrap();

        let keys = [
            "id",
            "name",
            "status",
            "createdAt",
            "updatedAt",
            "totalSpentTime",
            "taskCount",
        ];
        for key in keys {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(object["status"], 0);
    }

    #[test]
    fn test_accumulate_promotes_todo() {
        let mut project = Project::new(1, "Garden".to_string(), Local::now());
        project.accumulate(90, Local::now());
        assert_eq!(project.total_spent_time, 90);
        assert_eq!(project.status, ItemStatus::InProgress);

        project.accumulate(10, Local::now());
        assert_eq!(project.total_spent_time, 100);
        assert_eq!(project.status, ItemStatus::InProgress);
    }

    #[test]
    fn test_accumulate_keeps_done() {
        let mut project = Project::new(1, "Garden".to_string(), Local::now());
        project.status = ItemStatus::Done;
        project.accumulate(5, Local::now());
        assert_eq!(project.status, ItemStatus::Done);
        assert_eq!(project.total_spent_time, 5);
    }

    #[test]
    fn test_accumulate_zero_keeps_todo() {
        let mut project = Project::new(1, "Garden".to_string(), Local::now());
        project.accumulate(0, Local::now());
        assert_eq!(project.status, ItemStatus::Todo);
    }
}
