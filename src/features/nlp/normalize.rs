//! Turning parsed drafts into task records.

use chrono::NaiveDateTime;

use crate::core::{DateResolver, ResolveDate};
use crate::error::MarktaskError;
use crate::tasks::{TaskDraft, TaskRecord};

use super::BatchParser;

/// Resolve each draft's due text and build the final records.
///
/// The resolver runs once per draft with non-empty due text. Text that does
/// not resolve is dropped and the record gets no due date.
pub fn normalize_with<R: ResolveDate + ?Sized>(
    drafts: Vec<TaskDraft>,
    now: NaiveDateTime,
    resolver: &R,
) -> Vec<TaskRecord> {
    drafts
        .into_iter()
        .map(|draft| {
            let due = if draft.due_text.is_empty() {
                None
            } else {
                let resolved = resolver.resolve(&draft.due_text, now);
                if resolved.is_none() {
                    log::debug!(
                        "Dropping unresolved due text {:?} for '{}'",
                        draft.due_text,
                        draft.description
                    );
                }
                resolved
            };
            TaskRecord::from_draft(draft, due)
        })
        .collect()
}

/// Normalize drafts with the default date resolver.
#[must_use]
pub fn normalize(drafts: Vec<TaskDraft>, now: NaiveDateTime) -> Vec<TaskRecord> {
    normalize_with(drafts, now, &DateResolver::default())
}

/// Parses raw input straight into task records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskNormalizer {
    parser: BatchParser,
    resolver: DateResolver,
}

impl TaskNormalizer {
    /// Combine a batch parser with a date resolver.
    #[must_use]
    pub const fn new(parser: BatchParser, resolver: DateResolver) -> Self {
        Self { parser, resolver }
    }

    /// The batch parser used to split and parse input.
    #[must_use]
    pub const fn parser(&self) -> &BatchParser {
        &self.parser
    }

    /// The resolver applied to each draft's due text.
    #[must_use]
    pub const fn resolver(&self) -> &DateResolver {
        &self.resolver
    }

    /// Parse and normalize a batch of tasks.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::EmptyBatch` if the input holds no usable task.
    pub fn create(&self, input: &str, now: NaiveDateTime) -> Result<Vec<TaskRecord>, MarktaskError> {
        let drafts = self.parser.parse(input)?;
        Ok(normalize_with(drafts, now, &self.resolver))
    }
}
