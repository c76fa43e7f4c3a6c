//! Cross-entity updates.
//!
//! The coordinator only sees the two narrow traits below, so neither entity
//! service has to know the other's concrete type for cascading deletes or
//! for recording countdown time.

use crate::error::StoreResult;
use std::sync::Arc;
use tracing::debug;

/// Task-side capabilities the coordinator needs
pub trait TaskManager: Send + Sync {
    /// Remove every task stored for `project_id`
    fn delete_tasks_by_project(&self, project_id: u64) -> StoreResult<()>;

    /// Remove all task storage
    fn delete_all_tasks(&self) -> StoreResult<()>;

    /// Add elapsed seconds to one task (the task only, not its project)
    fn update_task_timer(&self, project_id: u64, task_id: u64, seconds: u64) -> StoreResult<()>;
}

/// Project-side capabilities the coordinator needs
pub trait ProjectManager: Send + Sync {
    fn delete_project(&self, project_id: u64) -> StoreResult<()>;

    fn delete_all_projects(&self) -> StoreResult<()>;

    /// Add elapsed seconds to one project
    fn update_project_timer(&self, project_id: u64, seconds: u64) -> StoreResult<()>;
}

pub struct UpdateCoordinator {
    tasks: Arc<dyn TaskManager>,
    projects: Arc<dyn ProjectManager>,
}

impl UpdateCoordinator {
    pub fn new(tasks: Arc<dyn TaskManager>, projects: Arc<dyn ProjectManager>) -> Self {
        Self { tasks, projects }
    }

    /// Delete a project's task file, then the project record.
    /// If the tasks cannot be removed the project is left untouched.
    pub fn delete_project_and_its_tasks(&self, project_id: u64) -> StoreResult<()> {
        self.tasks.delete_tasks_by_project(project_id)?;
        debug!(project_id, "removed tasks, deleting project");
        self.projects.delete_project(project_id)
    }

    /// Clear all task storage, then all projects
    pub fn delete_everything(&self) -> StoreResult<()> {
        self.tasks.delete_all_tasks()?;
        self.projects.delete_all_projects()
    }

    /// Apply elapsed seconds to the task, then to its project.
    /// Not transactional: a project failure leaves the task updated.
    pub fn record_elapsed_time(
        &self,
        task_id: u64,
        project_id: u64,
        seconds: u64,
    ) -> StoreResult<()> {
        debug!(task_id, project_id, seconds, "recording elapsed time");
        self.tasks.update_task_timer(project_id, task_id, seconds)?;
        self.projects.update_project_timer(project_id, seconds)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::recording_coordinator;
    use super::*;
    use crate::persistence::DataDir;
    use crate::service::{ProjectService, TaskService};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delete_project_order() {
        let (coordinator, log) = recording_coordinator(false, false);
        coordinator.delete_project_and_its_tasks(4).unwrap();
        assert_eq!(log.calls(), vec!["tasks.delete_by_project(4)", "projects.delete(4)"]);
    }

    #[test]
    fn test_delete_project_stops_when_tasks_fail() {
        let (coordinator, log) = recording_coordinator(true, false);
        assert!(coordinator.delete_project_and_its_tasks(4).is_err());
        assert_eq!(log.calls(), vec!["tasks.delete_by_project(4)"]);
    }

    #[test]
    fn test_delete_everything_order() {
        let (coordinator, log) = recording_coordinator(false, false);
        coordinator.delete_everything().unwrap();
        assert_eq!(log.calls(), vec!["tasks.delete_all", "projects.delete_all"]);
    }

    #[test]
    fn test_record_elapsed_time_task_then_project() {
        let (coordinator, log) = recording_coordinator(false, false);
        coordinator.record_elapsed_time(2, 7, 600).unwrap();
        assert_eq!(log.calls(), vec!["tasks.timer(7, 2, 600)", "projects.timer(7, 600)"]);
    }

    #[test]
    fn test_record_elapsed_time_partial_failure() {
        let (coordinator, log) = recording_coordinator(false, true);
        assert!(coordinator.record_elapsed_time(2, 7, 600).is_err());
        // Task side already committed
        assert_eq!(log.calls(), vec!["tasks.timer(7, 2, 600)", "projects.timer(7, 600)"]);
    }

    #[test]
    fn test_cascading_delete_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::new(dir.path());
        let projects = Arc::new(ProjectService::new(data_dir.projects_file()));
        projects.create("Thesis").unwrap();
        projects.create("Garden").unwrap();
        let tasks = TaskService::for_project(data_dir.clone(), projects.clone(), "1").unwrap();
        tasks.create("Outline").unwrap();
        tasks.create("Draft").unwrap();

        let coordinator = UpdateCoordinator::new(
            Arc::new(TaskService::detached(data_dir.clone(), projects.clone())),
            projects.clone(),
        );
        coordinator.delete_project_and_its_tasks(1).unwrap();

        assert!(!data_dir.task_file(1).exists());
        assert!(!projects.exists("1"));
        assert!(projects.exists("2"));
    }

    #[test]
    fn test_record_elapsed_time_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::new(dir.path());
        let projects = Arc::new(ProjectService::new(data_dir.projects_file()));
        projects.create("Thesis").unwrap();
        let tasks =
            Arc::new(TaskService::for_project(data_dir.clone(), projects.clone(), "1").unwrap());
        tasks.create("Outline").unwrap();

        let coordinator = UpdateCoordinator::new(tasks.clone(), projects.clone());
        coordinator.record_elapsed_time(1, 1, 10).unwrap();
        coordinator.record_elapsed_time(1, 1, 15).unwrap();

        assert_eq!(tasks.find_by_id("1").unwrap().total_spent_time, 25);
        assert_eq!(projects.find_by_id("1").unwrap().total_spent_time, 25);
    }
}
