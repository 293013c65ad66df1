//! Shared traits for task records and date resolution.

use chrono::{NaiveDate, NaiveDateTime};

use super::CanonicalDate;

/// Anything that can turn due text into a date relative to `now`.
///
/// `None` means the text did not resolve; implementations never fail.
pub trait ResolveDate {
    fn resolve(&self, text: &str, now: NaiveDateTime) -> Option<CanonicalDate>;
}

/// Trait for items that carry a due date.
pub trait Schedulable {
    /// The resolved due date, if any.
    ///
    /// Raw due text that never resolved to a date yields `None`.
    fn due_date(&self) -> Option<NaiveDate>;

    /// Check if this item is due on or before `today`.
    fn is_due(&self, today: NaiveDate) -> bool {
        self.due_date().is_some_and(|d| d <= today)
    }

    /// Check if this item is overdue (due strictly before `today`).
    fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date().is_some_and(|d| d < today)
    }

    /// Check if this item is due within the next N days.
    ///
    /// A horizon past the end of the calendar covers every due date.
    fn is_due_within(&self, days: i64, today: NaiveDate) -> bool {
        let horizon = chrono::Duration::try_days(days).and_then(|d| today.checked_add_signed(d));
        self.due_date()
            .is_some_and(|due| horizon.map_or(true, |h| due <= h))
    }
}
