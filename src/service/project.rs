use super::coordinator::ProjectManager;
use crate::domain::{filter_by_status, ItemStatus, Project};
use crate::error::{StoreError, StoreResult};
use crate::persistence::RecordStore;
use chrono::Local;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Project operations over the global projects file
#[derive(Debug, Clone)]
pub struct ProjectService {
    store: RecordStore<Project>,
}

impl ProjectService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: RecordStore::new(path),
        }
    }

    pub fn create(&self, name: &str) -> StoreResult<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("project name cannot be empty".to_string()));
        }

        let project = self
            .store
            .insert(|id| Project::new(id, name.to_string(), Local::now()))?;
        debug!(id = project.id, "created project");
        Ok(project)
    }

    pub fn rename(&self, id: &str, name: &str) -> StoreResult<Project> {
        self.store.update_name(id, name)
    }

    pub fn set_status(&self, id: &str, status: ItemStatus) -> StoreResult<Project> {
        self.store.update_status(id, status)
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Project> {
        self.store.find(id)
    }

    pub fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.delete_by_id(id)
    }

    pub fn delete_all(&self) -> StoreResult<()> {
        self.store.delete_all()
    }

    /// Best effort: invalid ids and unreadable storage both report false
    pub fn exists(&self, id: &str) -> bool {
        match self.store.find(id) {
            Ok(_) => true,
            Err(e) if e.is_not_found() => false,
            Err(e) => {
                warn!("project lookup for {:?} failed: {}", id, e);
                false
            }
        }
    }

    /// Best effort: empty string when the project cannot be read
    pub fn name_of(&self, id: u64) -> String {
        match self.store.load() {
            Ok(projects) => projects
                .into_iter()
                .find(|project| project.id == id)
                .map(|project| project.name)
                .unwrap_or_default(),
            Err(e) => {
                warn!("project name lookup for {} failed: {}", id, e);
                String::new()
            }
        }
    }

    /// Add focused seconds, promoting TODO to IN_PROGRESS
    pub fn add_spent_time(&self, id: u64, seconds: u64) -> StoreResult<Project> {
        self.store.add_spent_time(id, seconds)
    }

    /// Mirror the number of tasks stored for a project
    pub fn set_task_count(&self, id: u64, count: u64) -> StoreResult<()> {
        self.store.update_with(id, |project| project.task_count = count)?;
        Ok(())
    }

    /// All projects, or only those with `filter` status
    pub fn list(&self, filter: Option<ItemStatus>) -> StoreResult<Vec<Project>> {
        Ok(filter_by_status(self.store.load()?, filter))
    }

    /// Number of stored projects regardless of any filter
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.store.load()?.len())
    }
}

impl ProjectManager for ProjectService {
    fn delete_project(&self, project_id: u64) -> StoreResult<()> {
        self.store.delete(project_id)
    }

    fn delete_all_projects(&self) -> StoreResult<()> {
        self.delete_all()
    }

    fn update_project_timer(&self, project_id: u64, seconds: u64) -> StoreResult<()> {
        self.add_spent_time(project_id, seconds)?;
        Ok(())
    }
}
