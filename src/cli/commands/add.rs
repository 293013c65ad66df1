//! Add command implementations.
//!
//! `marktask add` parses the marker syntax; `marktask new` takes explicit fields.

use std::fmt::Write;

use chrono::NaiveDateTime;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{AddArgs, NewArgs, OutputFormat};
use crate::error::MarktaskError;
use crate::features::nlp::TaskNormalizer;
use crate::output::{format_drafts, format_task, NumberedTask};
use crate::storage::{NewTask, TaskStore};
use crate::tasks::{Priority, Recurrence};

/// Execute the add command.
///
/// # Errors
///
/// Returns `MarktaskError::EmptyBatch` if the input holds no task, or an
/// error if saving or output formatting fails.
pub fn add(
    store: &mut TaskStore,
    normalizer: &TaskNormalizer,
    args: AddArgs,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, MarktaskError> {
    if args.parse_only {
        let drafts = normalizer.parser().parse(&args.input)?;
        return format_drafts(&drafts, format);
    }

    let records = normalizer.create(&args.input, now)?;
    let first_id = store.tasks().len() + 1;
    let added = store.add(records);
    let count = added.len();

    let output = match format {
        OutputFormat::Json => {
            let items: Vec<_> = added
                .iter()
                .enumerate()
                .map(|(offset, task)| NumberedTask {
                    id: first_id + offset,
                    task,
                })
                .collect();
            let output = json!({
                "created": true,
                "count": count,
                "items": items,
            });
            serde_json::to_string_pretty(&output)?
        }
        OutputFormat::Pretty => {
            let mut output = format!("{} {count} task(s)\n", "Added:".green().bold());
            for (offset, task) in added.iter().enumerate() {
                write!(output, "  {}. {}", first_id + offset, task.description).ok();
                if let Some(due) = &task.due {
                    write!(output, "  {}", format!("^{due}").yellow()).ok();
                }
                output.push('\n');
            }
            output
        }
    };

    store.save()?;
    Ok(output)
}

/// Execute the new command.
///
/// # Errors
///
/// Returns an error if the description is blank, a field value is not
/// recognized, or saving fails.
pub fn new_task(
    store: &mut TaskStore,
    args: NewArgs,
    format: OutputFormat,
) -> Result<String, MarktaskError> {
    let new = NewTask {
        description: args.description,
        category: args.category,
        priority: Priority::parse_field(&args.priority)?,
        recurring: Recurrence::parse_field(&args.recurring)?,
        due: args.due,
    };

    let task = store.add_direct(new)?.clone();
    let id = store.tasks().len();
    store.save()?;

    match format {
        OutputFormat::Json => format_task(id, &task, format),
        OutputFormat::Pretty => Ok(format!(
            "{} {} (#{id})",
            "Created:".green().bold(),
            task.description
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Paths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn open(dir: &TempDir) -> TaskStore {
        TaskStore::open(&Paths::with_root(dir.path().to_path_buf())).unwrap()
    }

    fn add_args(input: &str, parse_only: bool) -> AddArgs {
        AddArgs {
            input: input.to_string(),
            parse_only,
        }
    }

    #[test]
    fn test_add_saves_tasks() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        let normalizer = TaskNormalizer::default();

        let result = add(
            &mut store,
            &normalizer,
            add_args("Buy milk @shopping ^tomorrow, Call mom", false),
            now(),
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["items"][0]["id"], 1);
        assert_eq!(value["items"][0]["due"], "2024-01-16");
        assert_eq!(value["items"][1]["id"], 2);

        let reloaded = open(&dir);
        assert_eq!(reloaded.tasks().len(), 2);
    }

    #[test]
    fn test_add_parse_only_does_not_save() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);

        let result = add(
            &mut store,
            &TaskNormalizer::default(),
            add_args("Plan trip !later ^next month", true),
            now(),
            OutputFormat::Json,
        )
        .unwrap();

        assert!(result.contains("\"due_text\": \"next month\""));
        assert!(store.tasks().is_empty());
        assert!(!dir.path().join("tasks.json").exists());
    }

    #[test]
    fn test_add_empty_batch() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);

        let err = add(
            &mut store,
            &TaskNormalizer::default(),
            add_args(" , ", false),
            now(),
            OutputFormat::Pretty,
        )
        .unwrap_err();
        assert!(matches!(err, MarktaskError::EmptyBatch));
    }

    #[test]
    fn test_new_task() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        let args = NewArgs {
            description: "Water plants @home".to_string(),
            category: String::new(),
            priority: "TODAY".to_string(),
            recurring: "weekly".to_string(),
            due: "saturday".to_string(),
        };

        let result = new_task(&mut store, args, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["description"], "Water plants @home");
        assert_eq!(value["priority"], "today");
        assert_eq!(value["due"], "saturday");
    }

    #[test]
    fn test_new_task_invalid_priority() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        let args = NewArgs {
            description: "x".to_string(),
            category: String::new(),
            priority: "high".to_string(),
            recurring: String::new(),
            due: String::new(),
        };

        let err = new_task(&mut store, args, OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, MarktaskError::InvalidValue { .. }));
        assert!(store.tasks().is_empty());
    }
}
