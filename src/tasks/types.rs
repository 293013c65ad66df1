use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{CanonicalDate, Schedulable};
use crate::error::MarktaskError;

/// Label used for tasks without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Priority levels for tasks.
///
/// `None` serializes as the empty string, matching the stored task format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// No priority set.
    #[default]
    #[serde(rename = "")]
    None,
    Urgent,
    Today,
    Tomorrow,
    Later,
}

impl Priority {
    /// Recognized marker tokens, in the order the grammar tries them.
    pub const TOKENS: [Self; 4] = [Self::Urgent, Self::Today, Self::Tomorrow, Self::Later];

    /// The canonical lowercase token ("" for `None`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Urgent => "urgent",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Later => "later",
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Match a marker token case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::TOKENS
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(token))
    }

    /// Parse a field value from user input; empty or `none` clears it.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::InvalidValue` for unrecognized tokens.
    pub fn parse_field(value: &str) -> Result<Self, MarktaskError> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        Self::from_token(value).ok_or_else(|| MarktaskError::InvalidValue {
            field: "priority",
            value: value.to_string(),
            expected: "urgent, today, tomorrow, later",
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Not recurring.
    #[default]
    #[serde(rename = "")]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Recognized marker tokens, in the order the grammar tries them.
    pub const TOKENS: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// The canonical lowercase token ("" for `None`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Match a marker token case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::TOKENS
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(token))
    }

    /// Parse a field value from user input; empty or `none` clears it.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::InvalidValue` for unrecognized tokens.
    pub fn parse_field(value: &str) -> Result<Self, MarktaskError> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        Self::from_token(value).ok_or_else(|| MarktaskError::InvalidValue {
            field: "recurring",
            value: value.to_string(),
            expected: "daily, weekly, monthly",
        })
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed task line before its due text has been resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    /// Never empty once emitted by the batch parser.
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub recurring: Recurrence,
    /// Raw due text, passed untouched to the date resolver.
    pub due_text: String,
}

/// A stored due date.
///
/// New tasks only ever carry `Date`. Editing a task with text that does not
/// resolve keeps that text as `Raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DueDate {
    Date(CanonicalDate),
    Raw(String),
}

impl DueDate {
    /// Store text as given: a canonical date if it already is one, raw
    /// otherwise, nothing if blank.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(
            text.parse::<CanonicalDate>()
                .map_or_else(|_| Self::Raw(text.to_string()), Self::Date),
        )
    }

    /// The resolved date, if this is one.
    #[must_use]
    pub const fn date(&self) -> Option<CanonicalDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{d}"),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

/// A task as persisted in the task files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub recurring: Recurrence,
    #[serde(default)]
    pub due: Option<DueDate>,
    /// Set when a recurring task is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_done: Option<CanonicalDate>,
}

impl TaskRecord {
    /// Create a task with only a description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            category: String::new(),
            priority: Priority::None,
            recurring: Recurrence::None,
            due: None,
            last_done: None,
        }
    }

    /// Build a record from a draft and its resolved due date.
    #[must_use]
    pub fn from_draft(draft: TaskDraft, due: Option<CanonicalDate>) -> Self {
        Self {
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            recurring: draft.recurring,
            due: due.map(DueDate::Date),
            last_done: None,
        }
    }

    /// The category, or `Uncategorized` when blank.
    #[must_use]
    pub fn category_label(&self) -> &str {
        let category = self.category.trim();
        if category.is_empty() {
            UNCATEGORIZED
        } else {
            category
        }
    }

    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        !self.recurring.is_none()
    }
}

impl Schedulable for TaskRecord {
    fn due_date(&self) -> Option<NaiveDate> {
        self.due
            .as_ref()
            .and_then(DueDate::date)
            .map(|d| d.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_tokens_case_insensitive() {
        assert_eq!(Priority::from_token("URGENT"), Some(Priority::Urgent));
        assert_eq!(Priority::from_token("urgent"), Some(Priority::Urgent));
        assert_eq!(Priority::from_token("Later"), Some(Priority::Later));
        assert_eq!(Priority::from_token("high"), None);
        assert_eq!(Priority::from_token(""), None);
    }

    #[test]
    fn test_priority_parse_field() {
        assert_eq!(Priority::parse_field("").unwrap(), Priority::None);
        assert_eq!(Priority::parse_field("none").unwrap(), Priority::None);
        assert_eq!(Priority::parse_field(" Today ").unwrap(), Priority::Today);
        assert!(matches!(
            Priority::parse_field("asap"),
            Err(MarktaskError::InvalidValue { field: "priority", .. })
        ));
    }

    #[test]
    fn test_recurrence_tokens() {
        assert_eq!(Recurrence::from_token("WEEKLY"), Some(Recurrence::Weekly));
        assert_eq!(Recurrence::from_token("yearly"), None);
        assert!(Recurrence::parse_field("hourly").is_err());
    }

    #[test]
    fn test_display_is_canonical_lowercase() {
        assert_eq!(Priority::Tomorrow.to_string(), "tomorrow");
        assert_eq!(Priority::None.to_string(), "");
        assert_eq!(Recurrence::Monthly.to_string(), "monthly");
    }

    #[test]
    fn test_record_serializes_in_stored_format() {
        let record = TaskRecord::new("Buy milk");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["description"], "Buy milk");
        assert_eq!(json["category"], "");
        assert_eq!(json["priority"], "");
        assert_eq!(json["recurring"], "");
        assert!(json["due"].is_null());
        assert!(json.get("last_done").is_none());
    }

    #[test]
    fn test_record_reads_stored_format() {
        let json = r#"{
            "description": "Pay rent",
            "category": "home",
            "priority": "urgent",
            "recurring": "monthly",
            "due": "2024-02-01",
            "last_done": "2024-01-01"
        }"#;
        let record: TaskRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.priority, Priority::Urgent);
        assert_eq!(record.recurring, Recurrence::Monthly);
        assert_eq!(
            record.due,
            Some(DueDate::Date("2024-02-01".parse().unwrap()))
        );
        assert_eq!(record.last_done, Some("2024-01-01".parse().unwrap()));
    }

    #[test]
    fn test_raw_due_text_is_kept_apart_from_dates() {
        let json = r#"{"description": "x", "due": "whenever"}"#;
        let record: TaskRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.due, Some(DueDate::Raw("whenever".to_string())));
        assert_eq!(record.due_date(), None);
    }

    #[test]
    fn test_due_from_text() {
        assert_eq!(DueDate::from_text("  "), None);
        assert_eq!(
            DueDate::from_text(" 2024-05-01 "),
            Some(DueDate::Date("2024-05-01".parse().unwrap()))
        );
        assert_eq!(
            DueDate::from_text("next tuesday"),
            Some(DueDate::Raw("next tuesday".to_string()))
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let record: TaskRecord = serde_json::from_str(r#"{"description": "x"}"#).unwrap();
        assert_eq!(record, TaskRecord::new("x"));
    }

    #[test]
    fn test_category_label() {
        let mut record = TaskRecord::new("x");
        assert_eq!(record.category_label(), UNCATEGORIZED);
        record.category = "  ".to_string();
        assert_eq!(record.category_label(), UNCATEGORIZED);
        record.category = "work".to_string();
        assert_eq!(record.category_label(), "work");
    }

    #[test]
    fn test_from_draft() {
        let draft = TaskDraft {
            description: "Call mom".to_string(),
            category: "family".to_string(),
            priority: Priority::Today,
            recurring: Recurrence::Weekly,
            due_text: "friday".to_string(),
        };
        let due: CanonicalDate = "2024-01-19".parse().unwrap();
        let record = TaskRecord::from_draft(draft, Some(due));

        assert_eq!(record.description, "Call mom");
        assert_eq!(record.due, Some(DueDate::Date(due)));
        assert!(record.is_recurring());
    }
}
