pub mod enums;
pub mod project;
pub mod record;
pub mod task;
pub mod views;

pub use enums::ItemStatus;
pub use project::Project;
pub use record::Record;
pub use task::Task;
pub use views::{count_left, filter_by_status, footer_text, format_clock, format_spent_time};
