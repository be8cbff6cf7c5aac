//! Screen controllers.
//!
//! # Responsibility
//! - Own the in-memory snapshot shown on screen.
//! - Translate user gestures into one store operation plus one incremental
//!   view update.

pub mod task_list;
