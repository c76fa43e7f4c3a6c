pub mod files;
pub mod settings;
pub mod store;

pub use files::{ensure_data_dir, init_local_data_dir, DataDir};
pub use settings::{load_settings, save_settings, Settings};
pub use store::RecordStore;
