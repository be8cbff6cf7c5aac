//! Task list row presenter.
//!
//! # Responsibility
//! - Render one `Task` into title, date and completion glyph fields.
//! - Report checkmark taps upward through `TaskRowDelegate`.
//!
//! # Invariants
//! - A row holds no state beyond the displayed fields of its bound task.
//! - Completed titles are rendered struck through.

use crate::model::task::{Task, TaskId};
use chrono::{DateTime, FixedOffset, Local, Utc};

/// Text shown when a task carries no creation time.
pub const MISSING_DATE_PLACEHOLDER: &str = "No date";

/// Fixed row height in logical points.
pub const ROW_HEIGHT: f32 = 80.0;

// Medium date style followed by short time style, e.g. `Apr 3, 2025 at 2:30 PM`.
const DATE_FORMAT: &str = "%b %-d, %Y at %-I:%M %p";

/// Completion indicator drawn next to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionGlyph {
    /// Unfilled circle.
    Empty,
    /// Filled circle with a checkmark.
    Filled,
}

impl CompletionGlyph {
    fn for_completion(is_completed: bool) -> Self {
        if is_completed {
            Self::Filled
        } else {
            Self::Empty
        }
    }

    /// Symbol name understood by the host icon set.
    pub fn symbol_name(self) -> &'static str {
        match self {
            Self::Empty => "circle",
            Self::Filled => "checkmark.circle.fill",
        }
    }
}

/// Receives gestures raised by a rendered row.
pub trait TaskRowDelegate {
    fn did_tap_checkmark(&mut self, row: &TaskRow);
}

/// Rendered state of one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Id of the task this row is bound to.
    pub task_id: TaskId,
    pub title: String,
    pub strikethrough: bool,
    pub date_text: String,
    pub glyph: CompletionGlyph,
}

impl TaskRow {
    /// Forwards a checkmark tap to `delegate`.
    pub fn checkmark_tapped<D: TaskRowDelegate + ?Sized>(&self, delegate: &mut D) {
        delegate.did_tap_checkmark(self);
    }
}

#[derive(Debug, Clone, Copy)]
enum DisplayZone {
    Local,
    Fixed(FixedOffset),
}

/// Renders tasks into `TaskRow`s.
#[derive(Debug, Clone, Copy)]
pub struct TaskRowPresenter {
    zone: DisplayZone,
}

impl Default for TaskRowPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRowPresenter {
    /// Presenter formatting dates in the system time zone.
    pub fn new() -> Self {
        Self {
            zone: DisplayZone::Local,
        }
    }

    /// Presenter formatting dates at a fixed UTC offset.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            zone: DisplayZone::Fixed(offset),
        }
    }

    /// Builds the row state for `task`.
    pub fn configure(&self, task: &Task) -> TaskRow {
        let date_text = task
            .created_at
            .and_then(|millis| self.format_timestamp(millis))
            .unwrap_or_else(|| MISSING_DATE_PLACEHOLDER.to_string());

        TaskRow {
            task_id: task.id,
            title: task.title.clone(),
            strikethrough: task.is_completed,
            date_text,
            glyph: CompletionGlyph::for_completion(task.is_completed),
        }
    }

    fn format_timestamp(&self, millis: i64) -> Option<String> {
        let utc = DateTime::<Utc>::from_timestamp_millis(millis)?;
        let formatted = match self.zone {
            DisplayZone::Local => utc.with_timezone(&Local).format(DATE_FORMAT),
            DisplayZone::Fixed(offset) => utc.with_timezone(&offset).format(DATE_FORMAT),
        };
        Some(formatted.to_string())
    }
}
