//! Metric calculations for the task lists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::Schedulable;
use crate::tasks::{Priority, TaskRecord};

/// Counts shown by `marktask stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Tasks still open
    pub active: usize,
    /// Open tasks marked `!urgent`
    pub urgent: usize,
    /// Open tasks marked `!today`
    pub today: usize,
    /// Open tasks whose due date is before today
    pub overdue: usize,
    /// Tasks in the completed list
    pub completed: usize,
}

impl TaskStats {
    /// Calculate stats from the active and completed lists.
    #[must_use]
    pub fn calculate(active: &[TaskRecord], completed: &[TaskRecord], today: NaiveDate) -> Self {
        let with_priority =
            |priority: Priority| active.iter().filter(|t| t.priority == priority).count();

        Self {
            active: active.len(),
            urgent: with_priority(Priority::Urgent),
            today: with_priority(Priority::Today),
            overdue: active.iter().filter(|t| t.is_overdue(today)).count(),
            completed: completed.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::DueDate;

    fn task(priority: Priority, due: Option<DueDate>) -> TaskRecord {
        TaskRecord {
            priority,
            due,
            ..TaskRecord::new("task")
        }
    }

    #[test]
    fn test_calculate() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let active = vec![
            task(Priority::Urgent, Some(DueDate::Date("2024-01-10".parse().unwrap()))),
            task(Priority::Urgent, None),
            task(Priority::Today, Some(DueDate::Date("2024-01-15".parse().unwrap()))),
            task(Priority::None, Some(DueDate::Raw("someday".to_string()))),
        ];
        let completed = vec![task(Priority::Later, None)];

        let stats = TaskStats::calculate(&active, &completed, today);

        assert_eq!(
            stats,
            TaskStats {
                active: 4,
                urgent: 2,
                today: 1,
                overdue: 1,
                completed: 1,
            }
        );
    }

    #[test]
    fn test_calculate_empty() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(TaskStats::calculate(&[], &[], today), TaskStats::default());
    }
}
