//! Display models for task list rows.
//!
//! # Responsibility
//! - Turn domain records into host-renderable row state.
//! - Route row gestures back to their owner through callback traits.

pub mod task_row;
