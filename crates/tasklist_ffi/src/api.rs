//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task list use-cases to Dart via FRB.
//! - Hand back rows already rendered by the core presenter.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens its own connection; no handle outlives a call.

use tasklist_core::db::open_db;
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, is_blank_title,
    AppConfig, SqliteTaskRepository, Task, TaskId, TaskRowPresenter, TaskStore,
    CREATE_FAILED_ALERT,
};
use std::path::PathBuf;
use std::sync::OnceLock;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowItem {
    /// Stable task ID in string form.
    pub task_id: String,
    pub title: String,
    /// Whether the title is drawn struck through.
    pub strikethrough: bool,
    /// Formatted creation time or the missing-date placeholder.
    pub date_text: String,
    /// Icon name for the completion glyph.
    pub glyph: String,
}

/// Full list response, newest task first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub items: Vec<TaskRowItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Result envelope for single-task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Re-rendered row after the mutation; `None` on failure and delete.
    pub row: Option<TaskRowItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, row: Option<TaskRowItem>) -> Self {
        Self {
            ok: true,
            row,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            row: None,
            message: message.into(),
        }
    }
}

/// Loads every task, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; storage failures yield an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list_load() -> TaskListResponse {
    let result = with_task_store(|store| {
        let presenter = TaskRowPresenter::new();
        store
            .fetch_all()
            .iter()
            .map(|task| to_row_item(&presenter, task))
            .collect::<Vec<_>>()
    });

    match result {
        Ok(items) => {
            let message = if items.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("Loaded {} task(s).", items.len())
            };
            TaskListResponse { items, message }
        }
        Err(err) => TaskListResponse {
            items: Vec::new(),
            message: format!("task_list_load failed: {err}"),
        },
    }
}

/// Creates a task from the add-task prompt.
///
/// # FFI contract
/// - Blank titles are rejected without touching storage.
/// - Never panics; returns the rendered row on success.
#[flutter_rust_bridge::frb(sync)]
pub fn task_create(title: String) -> TaskActionResponse {
    if is_blank_title(&title) {
        return TaskActionResponse::failure("task_create rejected: title cannot be empty");
    }

    let result = with_task_store(|store| {
        store
            .create(title.trim())
            .map(|task| to_row_item(&TaskRowPresenter::new(), &task))
    });

    match result {
        Ok(Some(row)) => TaskActionResponse::success("Task created.", Some(row)),
        Ok(None) => TaskActionResponse::failure(CREATE_FAILED_ALERT.message),
        Err(err) => TaskActionResponse::failure(format!("task_create failed: {err}")),
    }
}

/// Flips completion of one task and returns the re-rendered row.
///
/// # FFI contract
/// - Never panics; unknown or malformed IDs yield `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> TaskActionResponse {
    let id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => return TaskActionResponse::failure(message),
    };

    let result = with_task_store(|store| {
        let mut task = store.find(id).ok_or("task not found")?;
        task.toggle_completed();
        if !store.save(&task) {
            return Err("task could not be saved");
        }
        Ok(to_row_item(&TaskRowPresenter::new(), &task))
    });

    match result {
        Ok(Ok(row)) => TaskActionResponse::success("Task updated.", Some(row)),
        Ok(Err(reason)) => TaskActionResponse::failure(format!("task_toggle failed: {reason}")),
        Err(err) => TaskActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// Deletes one task.
///
/// # FFI contract
/// - Never panics; unknown or malformed IDs yield `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> TaskActionResponse {
    let id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => return TaskActionResponse::failure(message),
    };

    let result = with_task_store(|store| match store.find(id) {
        Some(task) => {
            store.delete(&task);
            store.find(id).is_none()
        }
        None => false,
    });

    match result {
        Ok(true) => TaskActionResponse::success("Task deleted.", None),
        Ok(false) => TaskActionResponse::failure("task_delete failed: task not found"),
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, String> {
    TaskId::parse_str(raw.trim()).map_err(|_| format!("invalid task id `{raw}`"))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| match AppConfig::from_env() {
            Ok(config) => config.db_path,
            Err(err) => {
                log::warn!("event=config_load module=ffi status=error error={err}");
                tasklist_core::config::default_db_path()
            }
        })
        .clone()
}

fn with_task_store<T>(
    f: impl FnOnce(&TaskStore<SqliteTaskRepository<'_>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("task DB open failed: {err}"))?;
    let repo = SqliteTaskRepository::try_new(&conn)
        .map_err(|err| format!("task repo init failed: {err}"))?;
    let store = TaskStore::new(repo);
    Ok(f(&store))
}

fn to_row_item(presenter: &TaskRowPresenter, task: &Task) -> TaskRowItem {
    let row = presenter.configure(task);
    TaskRowItem {
        task_id: row.task_id.to_string(),
        title: row.title,
        strikethrough: row.strikethrough,
        date_text: row.date_text,
        glyph: row.glyph.symbol_name().to_string(),
    }
}
