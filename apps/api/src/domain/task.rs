//! Task entity and its enums.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

/// Workflow state. Serialized as `TODO` / `IN_PROGRESS` / `COMPLETED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid status. Status must be TODO, IN_PROGRESS, or COMPLETED")]
pub struct InvalidStatus;

impl TaskStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(InvalidStatus),
        }
    }
}

/// Priority, serialized as its numeric level (1 low, 3 high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum TaskPriority {
    Low = 1,
    Medium = 2,
    High = 3,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid priority. Priority must be between 1 and 3")]
pub struct InvalidPriority;

impl From<TaskPriority> for i32 {
    fn from(priority: TaskPriority) -> Self {
        priority as i32
    }
}

impl TryFrom<i32> for TaskPriority {
    type Error = InvalidPriority;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            _ => Err(InvalidPriority),
        }
    }
}

/// A task, always owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
