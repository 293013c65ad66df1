//! Batch parsing of comma-separated task input.

use crate::error::MarktaskError;
use crate::tasks::TaskDraft;

use super::parse_line;

// Placeholder for escaped commas - uses null byte to avoid conflicts
const ESCAPED_COMMA_PLACEHOLDER: &str = "\x00COMMA\x00";

/// Splits raw input into task lines and parses each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchParser {
    escape_commas: bool,
}

impl Default for BatchParser {
    fn default() -> Self {
        Self::new(true)
    }
}

impl BatchParser {
    /// Create a batch parser.
    ///
    /// With `escape_commas` set, `\,` is a literal comma inside a task rather
    /// than a separator.
    #[must_use]
    pub const fn new(escape_commas: bool) -> Self {
        Self { escape_commas }
    }

    /// Split the input into trimmed, non-empty segments.
    #[must_use]
    pub fn segments(&self, input: &str) -> Vec<String> {
        let input = if self.escape_commas {
            input.replace("\\,", ESCAPED_COMMA_PLACEHOLDER)
        } else {
            input.to_string()
        };

        input
            .split(',')
            .map(|segment| segment.replace(ESCAPED_COMMA_PLACEHOLDER, ","))
            .map(|segment| segment.trim().to_string())
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Parse every task in the input, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::EmptyBatch` if no segment yields a task with a
    /// description.
    pub fn parse(&self, input: &str) -> Result<Vec<TaskDraft>, MarktaskError> {
        let drafts: Vec<TaskDraft> = self
            .segments(input)
            .iter()
            .map(|segment| parse_line(segment))
            .filter(|draft| !draft.description.is_empty())
            .collect();

        if drafts.is_empty() {
            return Err(MarktaskError::EmptyBatch);
        }

        log::debug!("Parsed {} task(s) from batch input", drafts.len());
        Ok(drafts)
    }
}

/// Parse comma-separated task input with the default settings.
///
/// # Errors
///
/// Returns `MarktaskError::EmptyBatch` if the input holds no usable task.
///
/// # Examples
///
/// ```
/// use marktask::features::nlp::parse_batch;
///
/// let drafts = parse_batch("Task A, Task B @work, ,  ").unwrap();
/// assert_eq!(drafts.len(), 2);
/// assert_eq!(drafts[1].category, "work");
///
/// assert!(parse_batch(" , , ").is_err());
/// ```
pub fn parse_batch(input: &str) -> Result<Vec<TaskDraft>, MarktaskError> {
    BatchParser::default().parse(input)
}
