pub mod commands;
pub mod handler;
pub mod timer_mode;

pub use commands::ItemCommand;
pub use handler::Repl;
