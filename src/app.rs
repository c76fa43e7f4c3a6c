use crate::domain::ItemStatus;
use crate::error::{parse_id, StoreResult};
use crate::input::commands::ItemCommand;
use crate::persistence::{load_settings, DataDir, Settings};
use crate::service::{ProjectService, TaskService, UpdateCoordinator};
use crate::ui::project_listing;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Everything a command needs: storage layout, settings and the services over it
pub struct App {
    data_dir: DataDir,
    settings: Settings,
    projects: Arc<ProjectService>,
    runtime: Runtime,
}

impl App {
    pub fn new(data_dir: DataDir) -> Result<Self> {
        let settings = load_settings(data_dir.settings_file())?;
        let projects = Arc::new(ProjectService::new(data_dir.projects_file()));
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .build()
            .context("Failed to start the countdown runtime")?;
        debug!(root = %data_dir.root().display(), "using data directory");

        Ok(Self {
            data_dir,
            settings,
            projects,
            runtime,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn projects(&self) -> &Arc<ProjectService> {
        &self.projects
    }

    /// Task service bound to one project's file
    pub fn task_service(&self, project_id: &str) -> StoreResult<Arc<TaskService>> {
        let tasks =
            TaskService::for_project(self.data_dir.clone(), self.projects.clone(), project_id)?;
        Ok(Arc::new(tasks))
    }

    pub fn coordinator(&self, tasks: Arc<TaskService>) -> Arc<UpdateCoordinator> {
        Arc::new(UpdateCoordinator::new(tasks, self.projects.clone()))
    }

    /// Coordinator for cascades that are not tied to one project
    fn cleanup_coordinator(&self) -> UpdateCoordinator {
        let tasks = TaskService::detached(self.data_dir.clone(), self.projects.clone());
        UpdateCoordinator::new(Arc::new(tasks), self.projects.clone())
    }

    /// Run a project-level command
    pub fn run_project_command(&self, command: ItemCommand) -> Result<()> {
        match command {
            ItemCommand::Add { name } => self.add_project(&name.join(" ")),
            ItemCommand::List { filter } => self.list_projects(filter.filter()),
            ItemCommand::Update { id, name } => self.rename_project(&id, &name.join(" ")),
            ItemCommand::Delete { id, all } => self.delete_projects(id.as_deref(), all),
            ItemCommand::Mark { id, status } => self.mark_project(&id, status.status()),
        }
    }

    fn add_project(&self, name: &str) -> Result<()> {
        let project = self.projects.create(name)?;
        println!("Project \"{}\" added with ID={}", project.name, project.id);
        Ok(())
    }

    fn list_projects(&self, filter: Option<ItemStatus>) -> Result<()> {
        let shown = self.projects.list(filter)?;
        let total = self.projects.count()?;
        project_listing(&shown, total, &self.settings.date_format).print()
    }

    fn rename_project(&self, id: &str, name: &str) -> Result<()> {
        self.projects.rename(id, name)?;
        Ok(())
    }

    /// Delete one project with its tasks, or everything with `all`
    fn delete_projects(&self, id: Option<&str>, all: bool) -> Result<()> {
        let coordinator = self.cleanup_coordinator();
        match id {
            Some(id) if !all => {
                let id = parse_id(id)?;
                coordinator.delete_project_and_its_tasks(id)?;
                println!("Project {} and its tasks deleted", id);
            }
            _ => {
                coordinator.delete_everything()?;
                println!("All projects and tasks deleted");
            }
        }
        Ok(())
    }

    fn mark_project(&self, id: &str, status: ItemStatus) -> Result<()> {
        self.projects.set_status(id, status)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::input::commands::{StatusArgs, StatusFilterArgs};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn app() -> (TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(DataDir::new(dir.path())).unwrap();
        (dir, app)
    }

    fn add(app: &App, name: &str) {
        app.run_project_command(ItemCommand::Add {
            name: name.split(' ').map(str::to_string).collect(),
        })
        .unwrap();
    }

    #[test]
    fn test_add_joins_words() {
        let (_dir, app) = app();
        add(&app, "Write my thesis");
        assert_eq!(app.projects().find_by_id("1").unwrap().name, "Write my thesis");
    }

    #[test]
    fn test_update_and_mark() {
        let (_dir, app) = app();
        add(&app, "Thesis");

        app.run_project_command(ItemCommand::Update {
            id: "1".to_string(),
            name: vec!["Dissertation".to_string()],
        })
        .unwrap();
        app.run_project_command(ItemCommand::Mark {
            id: "1".to_string(),
            status: StatusArgs {
                todo: false,
                in_progress: false,
                done: true,
            },
        })
        .unwrap();

        let project = app.projects().find_by_id("1").unwrap();
        assert_eq!(project.name, "Dissertation");
        assert_eq!(project.status, ItemStatus::Done);
    }

    #[test]
    fn test_list_projects_succeeds_on_empty_store() {
        let (_dir, app) = app();
        app.run_project_command(ItemCommand::List {
            filter: StatusFilterArgs::default(),
        })
        .unwrap();
    }

    #[test]
    fn test_delete_cascades_to_task_file() {
        let (dir, app) = app();
        add(&app, "Thesis");
        add(&app, "Garden");
        app.task_service("1").unwrap().create("Outline").unwrap();
        app.task_service("2").unwrap().create("Weed").unwrap();

        app.run_project_command(ItemCommand::Delete {
            id: Some("1".to_string()),
            all: false,
        })
        .unwrap();

        let data_dir = DataDir::new(dir.path());
        assert!(!data_dir.task_file(1).exists());
        assert!(data_dir.task_file(2).exists());
        assert!(!app.projects().exists("1"));
        assert!(app.projects().exists("2"));
    }

    #[test]
    fn test_delete_all_clears_everything() {
        let (dir, app) = app();
        add(&app, "Thesis");
        app.task_service("1").unwrap().create("Outline").unwrap();

        app.run_project_command(ItemCommand::Delete { id: None, all: true })
            .unwrap();

        assert!(DataDir::new(dir.path()).task_files().unwrap().is_empty());
        assert_eq!(app.projects().count().unwrap(), 0);
    }

    #[test]
    fn test_delete_invalid_or_missing_id() {
        let (_dir, app) = app();
        let err = app
            .run_project_command(ItemCommand::Delete {
                id: Some("x1".to_string()),
                all: false,
            })
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::InvalidId(_))));

        let err = app
            .run_project_command(ItemCommand::Delete {
                id: Some("9".to_string()),
                all: false,
            })
            .unwrap_err();
        assert!(err.downcast_ref::<StoreError>().unwrap().is_not_found());
    }
}
