//! Line-oriented terminal rendering of the task list screen.

use std::io::{BufRead, Write};
use tasklist_core::{Alert, CompletionGlyph, TaskListView, TaskRow, TextPrompt};

/// `TaskListView` that prints to `out` and reads prompt answers from `input`.
pub struct TerminalView<W: Write, I: BufRead> {
    out: W,
    input: I,
    show_reload: bool,
}

impl<W: Write, I: BufRead> TerminalView<W, I> {
    /// `show_reload` controls whether the initial full list is printed.
    pub fn new(out: W, input: I, show_reload: bool) -> Self {
        Self {
            out,
            input,
            show_reload,
        }
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            log::warn!("event=terminal_write module=cli status=error error={err}");
        }
    }
}

/// Formats one row as `  N. [x] title  (date)` with 1-based `N`.
pub fn format_row(index: usize, row: &TaskRow) -> String {
    let mark = match row.glyph {
        CompletionGlyph::Filled => "[x]",
        CompletionGlyph::Empty => "[ ]",
    };
    let title = if row.strikethrough {
        format!("~~{}~~", row.title)
    } else {
        row.title.clone()
    };
    format!("{:>3}. {mark} {title}  ({})", index + 1, row.date_text)
}

impl<W: Write, I: BufRead> TaskListView for TerminalView<W, I> {
    fn reload_data(&mut self, rows: &[TaskRow]) {
        if !self.show_reload {
            return;
        }
        if rows.is_empty() {
            self.line("No tasks yet.");
            return;
        }
        for (index, row) in rows.iter().enumerate() {
            let text = format_row(index, row);
            self.line(&text);
        }
    }

    fn insert_row(&mut self, index: usize, row: &TaskRow) {
        let text = format!("added: {}", format_row(index, row).trim_start());
        self.line(&text);
    }

    fn reload_row(&mut self, index: usize, row: &TaskRow) {
        let text = format!("updated: {}", format_row(index, row).trim_start());
        self.line(&text);
    }

    fn delete_row(&mut self, index: usize) {
        let text = format!("deleted: row {}", index + 1);
        self.line(&text);
    }

    fn present_alert(&mut self, alert: &Alert) {
        let text = format!("{}: {}", alert.title, alert.message);
        self.line(&text);
    }

    fn prompt_text(&mut self, prompt: &TextPrompt) -> Option<String> {
        let text = format!("{} - {} ({}): ", prompt.title, prompt.message, prompt.placeholder);
        if write!(self.out, "{text}").and_then(|()| self.out.flush()).is_err() {
            return None;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(answer.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}
