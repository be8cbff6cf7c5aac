//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for task records.
//! - Isolate SQLite query details from the persistence manager.
//!
//! # Invariants
//! - Repository writes enforce `Task::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod task_repo;
