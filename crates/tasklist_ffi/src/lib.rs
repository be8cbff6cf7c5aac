//! Flutter bridge for the TaskList core.

pub mod api;
