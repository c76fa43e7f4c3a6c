pub mod coordinator;
pub mod project;
pub mod task;

pub use coordinator::{ProjectManager, TaskManager, UpdateCoordinator};
pub use project::ProjectService;
pub use task::TaskService;
