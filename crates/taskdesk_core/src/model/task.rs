//! Task, note and reminder domain model.
//!
//! # Responsibility
//! - Define the task aggregate read models and the creation drafts.
//! - Keep status values byte-identical to the original store contents.
//!
//! # Invariants
//! - `status` is the only field mutated after creation.
//! - Notes and reminders always reference an existing task and author.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one task.
pub type TaskId = Uuid;
/// Stable identifier for one note.
pub type NoteId = Uuid;
/// Stable identifier for one reminder.
pub type ReminderId = Uuid;

/// Task lifecycle state. New tasks always start as `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    New,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Stable store value; matches the original display strings.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Parses one status from its store value. Exact match only.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "New" => Some(Self::New),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Input shape for task creation. The creator and the initial status are
/// supplied by the service layer, not by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: String,
    /// Optional deadline in epoch milliseconds.
    pub deadline: Option<i64>,
    pub category: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Rejects blank titles before any SQL runs.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        Ok(())
    }
}

/// Validation failures for task input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    BlankTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Task read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: String,
    /// Optional deadline in epoch milliseconds.
    pub deadline: Option<i64>,
    pub category: String,
    pub status: TaskStatus,
    pub created_by: UserId,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Note read model, attached to one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub note_id: NoteId,
    pub task_id: TaskId,
    pub content: String,
    pub created_by: UserId,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Reminder read model, attached to one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub reminder_id: ReminderId,
    pub task_id: TaskId,
    pub description: String,
    /// When the reminder fires, in epoch milliseconds.
    pub reminder_time: i64,
    pub created_by: UserId,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::{TaskDraft, TaskStatus, TaskValidationError};

    #[test]
    fn status_db_round_trip_is_exact() {
        for status in [TaskStatus::New, TaskStatus::InProgress, TaskStatus::Completed] {
            assert_eq!(TaskStatus::parse(status.as_db_str()), Some(status));
        }
    }

    #[test]
    fn status_store_values_match_original_display_strings() {
        assert_eq!(TaskStatus::New.as_db_str(), "New");
        assert_eq!(TaskStatus::InProgress.as_db_str(), "In Progress");
        assert_eq!(TaskStatus::Completed.as_db_str(), "Completed");
    }

    #[test]
    fn status_parse_rejects_unknown_values() {
        assert_eq!(TaskStatus::parse("new"), None);
        assert_eq!(TaskStatus::parse("Done"), None);
    }

    #[test]
    fn draft_validation_rejects_blank_title() {
        let draft = TaskDraft::new("   ");
        assert_eq!(draft.validate(), Err(TaskValidationError::BlankTitle));
        assert_eq!(TaskDraft::new("Ship release").validate(), Ok(()));
    }
}
