//! Task domain model.
//!
//! # Responsibility
//! - Define the single record type persisted by the task store.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion removes the record; there are no tombstones.

pub mod task;
