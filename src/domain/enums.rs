use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status shared by projects and tasks
///
/// Persisted as an integer code (0 = TODO, 1 = IN_PROGRESS, 2 = DONE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ItemStatus {
    Todo,
    InProgress,
    Done,
}

impl ItemStatus {
    /// Integer code used in collection files
    pub fn code(&self) -> u8 {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// Parse status from an integer code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Todo),
            1 => Some(Self::InProgress),
            2 => Some(Self::Done),
            _ => None,
        }
    }

    /// Label shown in listings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    /// Work on this item has not started yet
    pub fn is_left(&self) -> bool {
        matches!(self, Self::Todo)
    }
}

impl From<ItemStatus> for u8 {
    fn from(status: ItemStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for ItemStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown status code {}", code))
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
