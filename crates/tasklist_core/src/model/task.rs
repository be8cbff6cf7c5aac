//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record shared by store, presenter and
//!   controller.
//! - Provide write-time validation used by the repository layer.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is assigned once at creation and never mutated.
//! - `title` is non-empty (after trimming) for every persisted write.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task record.
pub type TaskId = Uuid;

/// Validation failures for task writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identity.
    pub id: TaskId,
    pub title: String,
    /// Unix epoch milliseconds. `None` only for rows written without a
    /// creation time.
    pub created_at: Option<i64>,
    pub is_completed: bool,
}

impl Task {
    /// Creates an open task stamped with the current wall-clock time.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_created_at(title, chrono::Utc::now().timestamp_millis())
    }

    /// Creates an open task with a caller-provided creation time.
    ///
    /// Used by import paths and tests that need deterministic ordering.
    pub fn with_created_at(title: impl Into<String>, created_at_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: Some(created_at_ms),
            is_completed: false,
        }
    }

    /// Flips the completion flag.
    pub fn toggle_completed(&mut self) {
        self.is_completed = !self.is_completed;
    }

    /// Validates fields required for persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if is_blank_title(&self.title) {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Returns whether a user-entered title must be rejected.
pub fn is_blank_title(title: &str) -> bool {
    title.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{is_blank_title, Task, TaskValidationError};

    #[test]
    fn new_task_starts_open_with_creation_time() {
        let task = Task::new("Buy milk");
        assert_eq!(task.title, "Buy milk");
        assert!(!task.is_completed);
        assert!(task.created_at.is_some());
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut task = Task::with_created_at("Walk dog", 1_000);
        task.toggle_completed();
        assert!(task.is_completed);
        task.toggle_completed();
        assert!(!task.is_completed);
        assert_eq!(task.created_at, Some(1_000));
    }

    #[test]
    fn validate_rejects_blank_titles() {
        assert_eq!(
            Task::new("  \t").validate(),
            Err(TaskValidationError::EmptyTitle)
        );
        assert!(Task::new("ok").validate().is_ok());
        assert!(is_blank_title(""));
        assert!(!is_blank_title(" x "));
    }
}
