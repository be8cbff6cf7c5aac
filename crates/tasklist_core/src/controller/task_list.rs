//! Task list screen controller.
//!
//! # Responsibility
//! - Mirror the store in an ordered snapshot (newest first).
//! - Bind the snapshot to a host `TaskListView`.
//! - Handle add, toggle and delete gestures.
//!
//! # Invariants
//! - Every mutating gesture performs exactly one synchronous store
//!   operation before touching the snapshot.
//! - Snapshot index `i` always corresponds to visible row `i`.
//! - Blank titles never reach the store.

use crate::model::task::{is_blank_title, Task, TaskId};
use crate::presenter::task_row::{TaskRow, TaskRowDelegate, TaskRowPresenter, ROW_HEIGHT};
use crate::repo::task_repo::TaskRepository;
use crate::service::task_store::TaskStore;
use log::{debug, warn};

/// Screen title.
pub const SCREEN_TITLE: &str = "My Tasks";

/// Modal alert with a single dismiss action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
    pub dismiss_label: &'static str,
}

/// Modal single-field text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub placeholder: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

/// Prompt shown by the add button.
pub const NEW_TASK_PROMPT: TextPrompt = TextPrompt {
    title: "New Task",
    message: "Enter the task title",
    placeholder: "Task title",
    confirm_label: "Add",
    cancel_label: "Cancel",
};

/// Alert shown when a task could not be persisted.
pub const CREATE_FAILED_ALERT: Alert = Alert {
    title: "Error",
    message: "Could not create the task. Please try again.",
    dismiss_label: "OK",
};

/// Host surface driven by `TaskListController`.
///
/// Row indexes are zero-based positions in the controller snapshot.
pub trait TaskListView {
    /// Replaces every visible row.
    fn reload_data(&mut self, rows: &[TaskRow]);
    fn insert_row(&mut self, index: usize, row: &TaskRow);
    fn reload_row(&mut self, index: usize, row: &TaskRow);
    fn delete_row(&mut self, index: usize);
    fn present_alert(&mut self, alert: &Alert);
    /// Shows a modal text prompt. Returns `None` when the user cancels.
    fn prompt_text(&mut self, prompt: &TextPrompt) -> Option<String>;
}

/// Controller for the single task list screen.
pub struct TaskListController<R: TaskRepository, V: TaskListView> {
    store: TaskStore<R>,
    view: V,
    presenter: TaskRowPresenter,
    tasks: Vec<Task>,
}

impl<R: TaskRepository, V: TaskListView> TaskListController<R, V> {
    /// Creates a controller with an empty snapshot. Call `view_did_load`
    /// to populate it.
    pub fn new(store: TaskStore<R>, view: V) -> Self {
        Self::with_presenter(store, view, TaskRowPresenter::new())
    }

    pub fn with_presenter(store: TaskStore<R>, view: V, presenter: TaskRowPresenter) -> Self {
        Self {
            store,
            view,
            presenter,
            tasks: Vec::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        SCREEN_TITLE
    }

    /// Loads the snapshot from the store and reloads the view.
    pub fn view_did_load(&mut self) {
        self.tasks = self.store.fetch_all();
        let rows = self.rows();
        self.view.reload_data(&rows);
        debug!(
            "event=task_list_load module=controller status=ok count={}",
            self.tasks.len()
        );
    }

    /// Prompts for a title and creates a task from it.
    ///
    /// Cancelled and blank input is dropped without touching the store.
    pub fn add_button_tapped(&mut self) {
        let Some(title) = self.view.prompt_text(&NEW_TASK_PROMPT) else {
            return;
        };
        if is_blank_title(&title) {
            return;
        }
        self.create_task(&title);
    }

    /// Persists a new task and prepends it to the snapshot.
    ///
    /// Returns `false` for blank titles (rejected before storage) and for
    /// store failures (reported to the user through an alert).
    pub fn create_task(&mut self, title: &str) -> bool {
        if is_blank_title(title) {
            debug!("event=task_create module=controller status=rejected reason=blank_title");
            return false;
        }

        match self.store.create(title.trim()) {
            Some(task) => {
                let row = self.presenter.configure(&task);
                self.tasks.insert(0, task);
                self.view.insert_row(0, &row);
                true
            }
            None => {
                self.view.present_alert(&CREATE_FAILED_ALERT);
                false
            }
        }
    }

    /// Flips completion of the task at `index`, persists it and reloads
    /// that row. On store failure the snapshot and view are left untouched.
    pub fn toggle_task_completion(&mut self, index: usize) {
        let Some(current) = self.tasks.get(index) else {
            warn!("event=task_toggle module=controller status=ignored reason=index_out_of_range index={index}");
            return;
        };

        let mut updated = current.clone();
        updated.toggle_completed();
        if !self.store.save(&updated) {
            return;
        }

        let row = self.presenter.configure(&updated);
        self.tasks[index] = updated;
        self.view.reload_row(index, &row);
    }

    /// Deletes the task at `index` (swipe-to-delete commit).
    pub fn commit_delete(&mut self, index: usize) {
        if index >= self.tasks.len() {
            warn!("event=task_delete module=controller status=ignored reason=index_out_of_range index={index}");
            return;
        }

        self.store.delete(&self.tasks[index]);
        self.tasks.remove(index);
        self.view.delete_row(index);
    }

    pub fn number_of_rows(&self) -> usize {
        self.tasks.len()
    }

    /// Renders the row at `index`, or `None` when out of range.
    pub fn row_at(&self, index: usize) -> Option<TaskRow> {
        self.tasks
            .get(index)
            .map(|task| self.presenter.configure(task))
    }

    pub fn row_height(&self) -> f32 {
        ROW_HEIGHT
    }

    /// Current position of the task bound to `task_id`.
    pub fn index_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }

    /// Read-only snapshot, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn rows(&self) -> Vec<TaskRow> {
        self.tasks
            .iter()
            .map(|task| self.presenter.configure(task))
            .collect()
    }
}

impl<R: TaskRepository, V: TaskListView> TaskRowDelegate for TaskListController<R, V> {
    fn did_tap_checkmark(&mut self, row: &TaskRow) {
        let Some(index) = self.index_of(row.task_id) else {
            debug!(
                "event=task_toggle module=controller status=ignored reason=stale_row task_id={}",
                row.task_id
            );
            return;
        };
        self.toggle_task_completion(index);
    }
}
