//! Core domain logic for TaskList.
//! This crate owns the task store, row presentation and the list screen
//! controller; front ends only render what it hands them.

pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use controller::task_list::{
    Alert, TaskListController, TaskListView, TextPrompt, CREATE_FAILED_ALERT, NEW_TASK_PROMPT,
    SCREEN_TITLE,
};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::task::{is_blank_title, Task, TaskId, TaskValidationError};
pub use presenter::task_row::{
    CompletionGlyph, TaskRow, TaskRowDelegate, TaskRowPresenter, MISSING_DATE_PLACEHOLDER,
    ROW_HEIGHT,
};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_store::TaskStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
