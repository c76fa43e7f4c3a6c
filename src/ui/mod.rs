pub mod styles;
pub mod table;

pub use table::{project_listing, task_listing, Listing};
