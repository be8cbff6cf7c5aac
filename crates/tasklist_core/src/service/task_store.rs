//! Task persistence manager.
//!
//! # Responsibility
//! - Provide the create/fetch/delete/save entry points used by the screen
//!   controller.
//! - Absorb storage failures: log them and hand back a degraded result.
//!
//! # Invariants
//! - No error type crosses this boundary; failures surface as `None`,
//!   an empty list, or `false`.
//! - Title validation beyond repository write checks belongs to callers.

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::TaskRepository;
use log::{debug, error, info};

/// Persistence manager wrapping a task repository.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Creates a store using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists an open task stamped with the current time.
    ///
    /// Returns `None` when persistence fails; the failure is logged.
    pub fn create(&self, title: impl Into<String>) -> Option<Task> {
        let task = Task::new(title);
        match self.repo.insert_task(&task) {
            Ok(id) => {
                info!("event=task_create module=store status=ok task_id={id}");
                Some(task)
            }
            Err(err) => {
                error!("event=task_create module=store status=error error={err}");
                None
            }
        }
    }

    /// Returns every stored task, newest first.
    ///
    /// Returns an empty list when the query fails; the failure is logged.
    pub fn fetch_all(&self) -> Vec<Task> {
        match self.repo.list_tasks() {
            Ok(tasks) => {
                debug!(
                    "event=task_fetch module=store status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Err(err) => {
                error!("event=task_fetch module=store status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Looks up one task by id. Lookup failures are logged and read as
    /// "not found".
    pub fn find(&self, id: TaskId) -> Option<Task> {
        match self.repo.get_task(id) {
            Ok(task) => task,
            Err(err) => {
                error!("event=task_find module=store status=error task_id={id} error={err}");
                None
            }
        }
    }

    /// Permanently removes `task` from storage. Failures are logged only.
    pub fn delete(&self, task: &Task) {
        match self.repo.delete_task(task.id) {
            Ok(()) => info!("event=task_delete module=store status=ok task_id={}", task.id),
            Err(err) => error!(
                "event=task_delete module=store status=error task_id={} error={err}",
                task.id
            ),
        }
    }

    /// Commits in-memory changes of `task` to durable storage.
    ///
    /// Skips the write when the stored copy already matches. Returns `false`
    /// when the commit fails; the failure is logged.
    pub fn save(&self, task: &Task) -> bool {
        match self.repo.get_task(task.id) {
            Ok(Some(stored)) if stored == *task => {
                debug!(
                    "event=task_save module=store status=skipped reason=no_changes task_id={}",
                    task.id
                );
                return true;
            }
            Ok(_) => {}
            Err(err) => {
                error!(
                    "event=task_save module=store status=error task_id={} error={err}",
                    task.id
                );
                return false;
            }
        }

        match self.repo.update_task(task) {
            Ok(()) => {
                info!(
                    "event=task_save module=store status=ok task_id={} is_completed={}",
                    task.id, task.is_completed
                );
                true
            }
            Err(err) => {
                error!(
                    "event=task_save module=store status=error task_id={} error={err}",
                    task.id
                );
                false
            }
        }
    }
}
