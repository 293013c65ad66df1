//! Error types for marktask.

use thiserror::Error;

/// Errors surfaced by the parser, the task store, and the CLI.
#[derive(Debug, Error)]
pub enum MarktaskError {
    /// The input contained no usable task.
    #[error("No valid tasks to add")]
    EmptyBatch,

    /// A task was created without a description.
    #[error("Task description is required")]
    MissingDescription,

    /// No task exists at the given position.
    #[error("Task not found: {0}")]
    NotFound(usize),

    /// A reorder request carried no tasks.
    #[error("No tasks provided")]
    EmptyReorder,

    /// A field value is not one of the accepted tokens.
    #[error("Invalid {field}: '{value}' (expected one of: {expected})")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(MarktaskError::EmptyBatch.to_string(), "No valid tasks to add");
        assert_eq!(MarktaskError::NotFound(4).to_string(), "Task not found: 4");
    }

    #[test]
    fn test_invalid_value_message() {
        let err = MarktaskError::InvalidValue {
            field: "priority",
            value: "high".to_string(),
            expected: "urgent, today, tomorrow, later",
        };
        assert_eq!(
            err.to_string(),
            "Invalid priority: 'high' (expected one of: urgent, today, tomorrow, later)"
        );
    }
}
