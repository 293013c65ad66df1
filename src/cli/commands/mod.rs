//! Command implementations for marktask.
//!
//! This module contains the implementation of all CLI commands. Each command
//! returns the text to print.

mod add;
mod completions;
mod stats;

pub use add::{add, new_task};
pub use completions::completions;
pub use stats::stats;

use chrono::{NaiveDate, NaiveDateTime};
use colored::Colorize;

use crate::cli::args::{EditArgs, ListArgs, OutputFormat};
use crate::core::{filter_tasks, DateResolver, TaskFilter};
use crate::error::MarktaskError;
use crate::output::{format_categories, format_task, format_tasks};
use crate::storage::{TaskStore, TaskUpdate};
use crate::tasks::{Priority, Recurrence};

/// Execute list command
///
/// # Errors
///
/// Returns an error if a filter value is invalid or output formatting fails.
pub fn list(
    store: &TaskStore,
    args: ListArgs,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, MarktaskError> {
    let filter = TaskFilter {
        category: args.category,
        priority: args
            .priority
            .as_deref()
            .map(Priority::parse_field)
            .transpose()?,
    };
    let tasks = filter_tasks(store.tasks(), &filter);
    let title = if filter.is_empty() { "Tasks" } else { "Filtered tasks" };
    format_tasks(&tasks, title, today, format)
}

/// Execute show command
///
/// # Errors
///
/// Returns `MarktaskError::NotFound` for a bad id, or an error if output
/// formatting fails.
pub fn show(store: &TaskStore, id: usize, format: OutputFormat) -> Result<String, MarktaskError> {
    let task = store.get(id)?;
    format_task(id, task, format)
}

/// Execute edit command
///
/// # Errors
///
/// Returns an error if the id is bad, a field value is invalid, or saving
/// fails.
pub fn edit(
    store: &mut TaskStore,
    args: EditArgs,
    resolver: &DateResolver,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, MarktaskError> {
    let update = TaskUpdate {
        description: args.description,
        category: args.category,
        priority: args.priority.as_deref().map(Priority::parse_field).transpose()?,
        recurring: args
            .recurring
            .as_deref()
            .map(Recurrence::parse_field)
            .transpose()?,
        due: args.due,
    };

    if update.is_empty() {
        return show(store, args.id, format);
    }

    let task = store.update(args.id, update, now, resolver)?.clone();
    store.save()?;

    match format {
        OutputFormat::Json => format_task(args.id, &task, format),
        OutputFormat::Pretty => Ok(format!(
            "{} {} (#{})",
            "Updated:".cyan().bold(),
            task.description,
            args.id
        )),
    }
}

/// Execute delete command
///
/// # Errors
///
/// Returns `MarktaskError::NotFound` for a bad id, or an error if saving fails.
pub fn delete(store: &mut TaskStore, id: usize, format: OutputFormat) -> Result<String, MarktaskError> {
    let task = store.delete(id)?;
    store.save()?;

    match format {
        OutputFormat::Json => format_task(id, &task, format),
        OutputFormat::Pretty => Ok(format!("{} {}", "Deleted:".red().bold(), task.description)),
    }
}

/// Execute done command
///
/// # Errors
///
/// Returns `MarktaskError::NotFound` for a bad id, or an error if saving fails.
pub fn done(
    store: &mut TaskStore,
    id: usize,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, MarktaskError> {
    let task = store.complete(id, today)?.clone();
    store.save()?;

    match format {
        OutputFormat::Json => format_task(id, &task, format),
        OutputFormat::Pretty => Ok(format!("{} {}", "Done:".green().bold(), task.description)),
    }
}

/// Execute completed command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn completed(
    store: &TaskStore,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, MarktaskError> {
    let tasks: Vec<_> = store
        .completed()
        .iter()
        .enumerate()
        .map(|(index, task)| (index + 1, task))
        .collect();
    format_tasks(&tasks, "Completed", today, format)
}

/// Execute categories command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn categories(
    store: &TaskStore,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, MarktaskError> {
    format_categories(&store.by_category(), today, format)
}

/// Execute move command
///
/// # Errors
///
/// Returns `MarktaskError::NotFound` if either id is bad, or an error if
/// saving fails.
pub fn move_task(
    store: &mut TaskStore,
    from: usize,
    to: usize,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, MarktaskError> {
    let description = store.move_task(from, to)?.description.clone();
    store.save()?;

    match format {
        OutputFormat::Json => {
            let tasks: Vec<_> = store
                .tasks()
                .iter()
                .enumerate()
                .map(|(index, task)| (index + 1, task))
                .collect();
            format_tasks(&tasks, "Tasks", today, format)
        }
        OutputFormat::Pretty => Ok(format!(
            "{} {description} ({from} -> {to})",
            "Moved:".cyan().bold()
        )),
    }
}
