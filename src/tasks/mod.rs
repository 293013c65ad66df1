//! Task data model.
//!
//! Drafts come out of the parser; records are what the task store keeps.

mod types;

pub use types::{DueDate, Priority, Recurrence, TaskDraft, TaskRecord, UNCATEGORIZED};
