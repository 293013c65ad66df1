//! Filtering of the active task list.
//!
//! Filters keep each task's 1-based position so listings can show the id a
//! user passes to `edit`, `done` or `delete`.

use crate::tasks::{Priority, TaskRecord};

/// Category and/or priority filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Category label; `Uncategorized` matches tasks with a blank category.
    pub category: Option<String>,
    /// `Priority::None` matches tasks without a priority.
    pub priority: Option<Priority>,
}

impl TaskFilter {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.priority.is_none()
    }

    /// Check whether a task passes the filter.
    #[must_use]
    pub fn matches(&self, task: &TaskRecord) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| task.category_label().eq_ignore_ascii_case(c.trim()));
        let priority_ok = self.priority.map_or(true, |p| task.priority == p);
        category_ok && priority_ok
    }
}

/// Apply a filter, pairing each kept task with its 1-based position.
pub fn filter_tasks<'a>(tasks: &'a [TaskRecord], filter: &TaskFilter) -> Vec<(usize, &'a TaskRecord)> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.matches(task))
        .map(|(index, task)| (index + 1, task))
        .collect()
}
