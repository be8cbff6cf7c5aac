use std::cell::Cell;
use std::collections::VecDeque;
use tasklist_core::db::open_db_in_memory;
use tasklist_core::{
    Alert, CompletionGlyph, RepoError, RepoResult, SqliteTaskRepository, Task, TaskId,
    TaskListController, TaskListView, TaskRepository, TaskRow, TaskStore, TextPrompt,
    CREATE_FAILED_ALERT, NEW_TASK_PROMPT, ROW_HEIGHT, SCREEN_TITLE,
};

#[derive(Debug, Clone, PartialEq)]
enum ViewEvent {
    Reload(Vec<String>),
    Insert(usize, String),
    ReloadRow(usize, CompletionGlyph),
    Delete(usize),
    Alert(Alert),
    Prompt(TextPrompt),
}

/// Records view updates and answers prompts from a script.
#[derive(Default)]
struct RecordingView {
    events: Vec<ViewEvent>,
    prompt_answers: VecDeque<Option<String>>,
}

impl TaskListView for RecordingView {
    fn reload_data(&mut self, rows: &[TaskRow]) {
        self.events.push(ViewEvent::Reload(
            rows.iter().map(|row| row.title.clone()).collect(),
        ));
    }

    fn insert_row(&mut self, index: usize, row: &TaskRow) {
        self.events.push(ViewEvent::Insert(index, row.title.clone()));
    }

    fn reload_row(&mut self, index: usize, row: &TaskRow) {
        self.events.push(ViewEvent::ReloadRow(index, row.glyph));
    }

    fn delete_row(&mut self, index: usize) {
        self.events.push(ViewEvent::Delete(index));
    }

    fn present_alert(&mut self, alert: &Alert) {
        self.events.push(ViewEvent::Alert(*alert));
    }

    fn prompt_text(&mut self, prompt: &TextPrompt) -> Option<String> {
        self.events.push(ViewEvent::Prompt(*prompt));
        self.prompt_answers.pop_front().flatten()
    }
}

/// SQLite repository that counts inserts and can be told to fail writes.
struct ProbeRepo<'conn> {
    inner: SqliteTaskRepository<'conn>,
    inserts: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl<'conn> ProbeRepo<'conn> {
    fn new(conn: &'conn rusqlite::Connection) -> Self {
        Self {
            inner: SqliteTaskRepository::try_new(conn).unwrap(),
            inserts: Cell::new(0),
            fail_writes: Cell::new(false),
        }
    }

    fn check_writable(&self) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(RepoError::InvalidData("read-only storage".to_string()));
        }
        Ok(())
    }
}

impl TaskRepository for ProbeRepo<'_> {
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId> {
        self.inserts.set(self.inserts.get() + 1);
        self.check_writable()?;
        self.inner.insert_task(task)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        self.check_writable()?;
        self.inner.update_task(task)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.inner.get_task(id)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.inner.list_tasks()
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.check_writable()?;
        self.inner.delete_task(id)
    }
}

fn controller<'a>(
    repo: &'a ProbeRepo<'a>,
) -> TaskListController<&'a ProbeRepo<'a>, RecordingView> {
    let mut controller = TaskListController::new(TaskStore::new(repo), RecordingView::default());
    controller.view_did_load();
    controller
}

fn seed(conn: &rusqlite::Connection, titles: &[(&str, i64)]) {
    let repo = SqliteTaskRepository::try_new(conn).unwrap();
    for (title, created_at) in titles {
        repo.insert_task(&Task::with_created_at(*title, *created_at))
            .unwrap();
    }
}

#[test]
fn load_reloads_view_with_newest_first() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("old", 1_000), ("new", 2_000)]);
    let repo = ProbeRepo::new(&conn);
    let controller = controller(&repo);

    assert_eq!(controller.title(), SCREEN_TITLE);
    assert_eq!(controller.row_height(), ROW_HEIGHT);
    assert_eq!(controller.number_of_rows(), 2);
    assert_eq!(
        controller.view().events,
        vec![ViewEvent::Reload(vec!["new".to_string(), "old".to_string()])]
    );
    assert_eq!(controller.row_at(0).unwrap().title, "new");
    assert!(controller.row_at(2).is_none());
}

#[test]
fn add_prompts_then_prepends_one_row() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("existing", 1_000)]);
    let repo = ProbeRepo::new(&conn);
    let mut controller = controller(&repo);
    controller
        .view_mut()
        .prompt_answers
        .push_back(Some("Buy milk".to_string()));

    controller.add_button_tapped();

    assert_eq!(
        controller.view().events[1..],
        [
            ViewEvent::Prompt(NEW_TASK_PROMPT),
            ViewEvent::Insert(0, "Buy milk".to_string()),
        ]
    );
    assert_eq!(controller.tasks()[0].title, "Buy milk");
    assert_eq!(controller.tasks()[1].title, "existing");
    assert_eq!(repo.list_tasks().unwrap()[0].id, controller.tasks()[0].id);
}

#[test]
fn blank_or_cancelled_input_never_reaches_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = ProbeRepo::new(&conn);
    let mut controller = controller(&repo);
    controller.view_mut().prompt_answers.extend([
        Some(String::new()),
        Some("   ".to_string()),
        None,
    ]);

    controller.add_button_tapped();
    controller.add_button_tapped();
    controller.add_button_tapped();
    assert!(!controller.create_task(""));

    assert_eq!(repo.inserts.get(), 0);
    assert_eq!(controller.number_of_rows(), 0);
    assert!(controller
        .view()
        .events
        .iter()
        .all(|event| matches!(event, ViewEvent::Reload(_) | ViewEvent::Prompt(_))));
}

#[test]
fn failed_create_presents_error_alert() {
    let conn = open_db_in_memory().unwrap();
    let repo = ProbeRepo::new(&conn);
    let mut controller = controller(&repo);
    repo.fail_writes.set(true);

    assert!(!controller.create_task("Will fail"));

    assert_eq!(repo.inserts.get(), 1);
    assert_eq!(controller.number_of_rows(), 0);
    assert_eq!(
        controller.view().events.last(),
        Some(&ViewEvent::Alert(CREATE_FAILED_ALERT))
    );
}

#[test]
fn toggle_persists_and_reloads_one_row() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("a", 1_000), ("b", 2_000)]);
    let repo = ProbeRepo::new(&conn);
    let mut controller = controller(&repo);
    let created_at = controller.tasks()[1].created_at;

    controller.toggle_task_completion(1);
    assert!(controller.tasks()[1].is_completed);
    assert!(repo.get_task(controller.tasks()[1].id).unwrap().unwrap().is_completed);
    assert_eq!(
        controller.view().events.last(),
        Some(&ViewEvent::ReloadRow(1, CompletionGlyph::Filled))
    );

    controller.toggle_task_completion(1);
    assert!(!controller.tasks()[1].is_completed);
    assert_eq!(controller.tasks()[1].created_at, created_at);
    assert_eq!(
        controller.view().events.last(),
        Some(&ViewEvent::ReloadRow(1, CompletionGlyph::Empty))
    );
}

#[test]
fn failed_toggle_leaves_snapshot_and_view_untouched() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("a", 1_000)]);
    let repo = ProbeRepo::new(&conn);
    let mut controller = controller(&repo);
    repo.fail_writes.set(true);
    let events_before = controller.view().events.len();

    controller.toggle_task_completion(0);

    assert!(!controller.tasks()[0].is_completed);
    assert_eq!(controller.view().events.len(), events_before);
}

#[test]
fn checkmark_tap_toggles_the_bound_task() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("a", 1_000), ("b", 2_000)]);
    let repo = ProbeRepo::new(&conn);
    let mut controller = controller(&repo);

    let row = controller.row_at(1).unwrap();
    assert_eq!(row.title, "a");
    row.checkmark_tapped(&mut controller);

    assert!(controller.tasks()[1].is_completed);
    assert!(!controller.tasks()[0].is_completed);
}

#[test]
fn checkmark_tap_follows_row_after_insert_shifts_indexes() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("a", 1_000)]);
    let repo = ProbeRepo::new(&conn);
    let mut controller = controller(&repo);

    let row = controller.row_at(0).unwrap();
    assert!(controller.create_task("newer"));
    row.checkmark_tapped(&mut controller);

    assert_eq!(controller.tasks()[1].title, "a");
    assert!(controller.tasks()[1].is_completed);
    assert_eq!(
        controller.view().events.last(),
        Some(&ViewEvent::ReloadRow(1, CompletionGlyph::Filled))
    );
}

#[test]
fn delete_removes_from_store_snapshot_and_view() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("a", 1_000), ("b", 2_000)]);
    let repo = ProbeRepo::new(&conn);
    let mut controller = controller(&repo);
    let stale_row = controller.row_at(0).unwrap();

    controller.commit_delete(0);

    assert_eq!(controller.number_of_rows(), 1);
    assert_eq!(controller.tasks()[0].title, "a");
    assert_eq!(controller.view().events.last(), Some(&ViewEvent::Delete(0)));
    let remaining = repo.list_tasks().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "a");

    let events_before = controller.view().events.len();
    stale_row.checkmark_tapped(&mut controller);
    assert_eq!(controller.view().events.len(), events_before);
}

#[test]
fn out_of_range_indexes_are_ignored() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[("a", 1_000)]);
    let repo = ProbeRepo::new(&conn);
    let mut controller = controller(&repo);

    controller.toggle_task_completion(5);
    controller.commit_delete(5);

    assert_eq!(controller.number_of_rows(), 1);
    assert_eq!(controller.view().events.len(), 1);
}

#[test]
fn buy_milk_through_the_screen() {
    let conn = open_db_in_memory().unwrap();
    let repo = ProbeRepo::new(&conn);
    let mut controller = controller(&repo);

    assert!(controller.create_task("Buy milk"));
    let fetched = repo.list_tasks().unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].title, "Buy milk");
    assert!(!fetched[0].is_completed);

    controller.toggle_task_completion(0);
    assert!(repo.list_tasks().unwrap()[0].is_completed);

    controller.commit_delete(0);
    assert!(repo.list_tasks().unwrap().is_empty());
    assert_eq!(controller.number_of_rows(), 0);
}
