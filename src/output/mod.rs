//! Output formatting for marktask.
//!
//! This module provides formatters for displaying tasks in various formats.

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::cli::args::OutputFormat;
use crate::error::MarktaskError;
use crate::features::stats::TaskStats;
use crate::tasks::{TaskDraft, TaskRecord};

pub use json::*;
pub use pretty::*;

/// Format numbered tasks based on output format
///
/// # Errors
///
/// Returns `MarktaskError::Json` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[(usize, &TaskRecord)],
    title: &str,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, MarktaskError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title, today)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `MarktaskError::Json` if JSON serialization fails.
pub fn format_task(id: usize, task: &TaskRecord, format: OutputFormat) -> Result<String, MarktaskError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(id, task)),
        OutputFormat::Json => format_task_json(id, task),
    }
}

/// Format parsed drafts based on output format
///
/// # Errors
///
/// Returns `MarktaskError::Json` if JSON serialization fails.
pub fn format_drafts(drafts: &[TaskDraft], format: OutputFormat) -> Result<String, MarktaskError> {
    match format {
        OutputFormat::Pretty => Ok(format_drafts_pretty(drafts)),
        OutputFormat::Json => format_drafts_json(drafts),
    }
}

/// Format category groups based on output format
///
/// # Errors
///
/// Returns `MarktaskError::Json` if JSON serialization fails.
pub fn format_categories(
    groups: &[(String, Vec<(usize, &TaskRecord)>)],
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, MarktaskError> {
    match format {
        OutputFormat::Pretty => Ok(format_categories_pretty(groups, today)),
        OutputFormat::Json => format_categories_json(groups),
    }
}

/// Format stats based on output format
///
/// # Errors
///
/// Returns `MarktaskError::Json` if JSON serialization fails.
pub fn format_stats(stats: &TaskStats, format: OutputFormat) -> Result<String, MarktaskError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => format_stats_json(stats),
    }
}
