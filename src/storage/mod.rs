//! Storage layer for marktask.
//!
//! Tasks are kept in two JSON files: the ordered active list and the
//! completed list.

mod task_store;

pub use task_store::{NewTask, TaskStore, TaskUpdate};
