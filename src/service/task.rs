use super::coordinator::TaskManager;
use super::project::ProjectService;
use crate::domain::{filter_by_status, ItemStatus, Task};
use crate::error::{parse_id, StoreError, StoreResult};
use crate::persistence::{DataDir, RecordStore};
use chrono::Local;
use std::sync::Arc;
use tracing::debug;

/// The project whose task file a service reads and writes
#[derive(Debug, Clone)]
struct Scope {
    project_id: u64,
    store: RecordStore<Task>,
}

/// Task operations scoped to one project's task file
///
/// Project-wide cleanup (removing task files) works without a scope, which is
/// what the cascading deletes use.
#[derive(Debug, Clone)]
pub struct TaskService {
    data_dir: DataDir,
    projects: Arc<ProjectService>,
    scope: Option<Scope>,
}

impl TaskService {
    /// Open the task file of `project_id`. The id must be numeric.
    pub fn for_project(
        data_dir: DataDir,
        projects: Arc<ProjectService>,
        project_id: &str,
    ) -> StoreResult<Self> {
        let project_id = parse_id(project_id)?;
        let store = RecordStore::new(data_dir.task_file(project_id));
        Ok(Self {
            data_dir,
            projects,
            scope: Some(Scope { project_id, store }),
        })
    }

    /// A service without a selected project, for task-file cleanup only
    pub fn detached(data_dir: DataDir, projects: Arc<ProjectService>) -> Self {
        Self {
            data_dir,
            projects,
            scope: None,
        }
    }

    #[cfg(test)]
    pub fn project_id(&self) -> Option<u64> {
        self.scope.as_ref().map(|scope| scope.project_id)
    }

    fn scope(&self) -> StoreResult<&Scope> {
        self.scope
            .as_ref()
            .ok_or_else(|| StoreError::Validation("no project selected".to_string()))
    }

    fn refresh_task_count(&self, scope: &Scope) -> StoreResult<()> {
        let count = scope.store.load()?.len() as u64;
        self.projects.set_task_count(scope.project_id, count)
    }

    pub fn create(&self, name: &str) -> StoreResult<Task> {
        let scope = self.scope()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("task name cannot be empty".to_string()));
        }

        let task = scope
            .store
            .insert(|id| Task::new(id, scope.project_id, name.to_string(), Local::now()))?;
        debug!(project_id = scope.project_id, id = task.id, "created task");

        self.refresh_task_count(scope)?;
        Ok(task)
    }

    pub fn rename(&self, id: &str, name: &str) -> StoreResult<Task> {
        self.scope()?.store.update_name(id, name)
    }

    pub fn set_status(&self, id: &str, status: ItemStatus) -> StoreResult<Task> {
        self.scope()?.store.update_status(id, status)
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Task> {
        self.scope()?.store.find(id)
    }

    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let scope = self.scope()?;
        scope.store.delete_by_id(id)?;
        self.refresh_task_count(scope)
    }

    /// Clear every task of the selected project
    pub fn delete_all(&self) -> StoreResult<()> {
        let scope = self.scope()?;
        scope.store.delete_all()?;
        self.projects.set_task_count(scope.project_id, 0)
    }

    /// Add focused seconds to a task and forward the same delta to its project.
    ///
    /// The two writes are independent: if the project update fails, the task
    /// keeps its new time.
    pub fn add_spent_time(&self, id: u64, seconds: u64) -> StoreResult<Task> {
        let task = self.scope()?.store.add_spent_time(id, seconds)?;
        self.projects.add_spent_time(task.project_id, seconds)?;
        Ok(task)
    }

    /// Remove a project's task file entirely
    pub fn delete_all_for_project(&self, project_id: u64) -> StoreResult<()> {
        RecordStore::<Task>::new(self.data_dir.task_file(project_id)).remove()
    }

    pub fn list(&self, filter: Option<ItemStatus>) -> StoreResult<Vec<Task>> {
        Ok(filter_by_status(self.scope()?.store.load()?, filter))
    }

    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.scope()?.store.load()?.len())
    }
}

impl TaskManager for TaskService {
    fn delete_tasks_by_project(&self, project_id: u64) -> StoreResult<()> {
        self.delete_all_for_project(project_id)
    }

    fn delete_all_tasks(&self) -> StoreResult<()> {
        for path in self.data_dir.task_files()? {
            RecordStore::<Task>::new(path).remove()?;
        }
        Ok(())
    }

    fn update_task_timer(&self, project_id: u64, task_id: u64, seconds: u64) -> StoreResult<()> {
        RecordStore::<Task>::new(self.data_dir.task_file(project_id))
            .add_spent_time(task_id, seconds)?;
        Ok(())
    }
}
