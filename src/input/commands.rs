use crate::domain::ItemStatus;
use clap::{Args, Subcommand};

/// Exactly one target status, for `mark`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct StatusArgs {
    #[arg(long)]
    pub todo: bool,
    #[arg(long)]
    pub in_progress: bool,
    #[arg(long)]
    pub done: bool,
}

impl StatusArgs {
    pub fn status(&self) -> ItemStatus {
        flags_to_status(self.todo, self.in_progress, self.done).unwrap_or(ItemStatus::Todo)
    }
}

/// Optional status filter, for `list`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(required = false, multiple = false)]
pub struct StatusFilterArgs {
    /// Only items not started yet
    #[arg(long)]
    pub todo: bool,
    /// Only items with recorded time
    #[arg(long)]
    pub in_progress: bool,
    /// Only finished items
    #[arg(long)]
    pub done: bool,
}

impl StatusFilterArgs {
    pub fn filter(&self) -> Option<ItemStatus> {
        flags_to_status(self.todo, self.in_progress, self.done)
    }
}

/// Commands shared by the project level and the task REPL
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ItemCommand {
    /// Create an entry
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Show entries as a table
    List {
        #[command(flatten)]
        filter: StatusFilterArgs,
    },
    /// Rename an entry
    Update {
        id: String,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Delete one entry, or all of them with --all
    Delete {
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        id: Option<String>,
        #[arg(long)]
        all: bool,
    },
    /// Set the status of an entry
    Mark {
        id: String,
        #[command(flatten)]
        status: StatusArgs,
    },
}

fn flags_to_status(todo: bool, in_progress: bool, done: bool) -> Option<ItemStatus> {
    if todo {
        Some(ItemStatus::Todo)
    } else if in_progress {
        Some(ItemStatus::InProgress)
    } else if done {
        Some(ItemStatus::Done)
    } else {
        None
    }
}
