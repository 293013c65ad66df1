//! JSON output formatting for marktask.

use serde::Serialize;
use serde_json::json;

use crate::error::MarktaskError;
use crate::features::stats::TaskStats;
use crate::tasks::{TaskDraft, TaskRecord};

/// A task paired with its position in the active list.
#[derive(Debug, Serialize)]
pub struct NumberedTask<'a> {
    pub id: usize,
    #[serde(flatten)]
    pub task: &'a TaskRecord,
}

fn numbered<'a>(tasks: &[(usize, &'a TaskRecord)]) -> Vec<NumberedTask<'a>> {
    tasks
        .iter()
        .map(|&(id, task)| NumberedTask { id, task })
        .collect()
}

/// Format numbered tasks as JSON
///
/// # Errors
///
/// Returns `MarktaskError::Json` if JSON serialization fails.
pub fn format_tasks_json(
    tasks: &[(usize, &TaskRecord)],
    list_name: &str,
) -> Result<String, MarktaskError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": numbered(tasks),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single task as JSON
///
/// # Errors
///
/// Returns `MarktaskError::Json` if JSON serialization fails.
pub fn format_task_json(id: usize, task: &TaskRecord) -> Result<String, MarktaskError> {
    Ok(serde_json::to_string_pretty(&NumberedTask { id, task })?)
}

/// Format parsed drafts as JSON
///
/// # Errors
///
/// Returns `MarktaskError::Json` if JSON serialization fails.
pub fn format_drafts_json(drafts: &[TaskDraft]) -> Result<String, MarktaskError> {
    let output = json!({
        "parsed": true,
        "count": drafts.len(),
        "items": drafts,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format category groups as JSON
///
/// # Errors
///
/// Returns `MarktaskError::Json` if JSON serialization fails.
pub fn format_categories_json(
    groups: &[(String, Vec<(usize, &TaskRecord)>)],
) -> Result<String, MarktaskError> {
    let categories: Vec<_> = groups
        .iter()
        .map(|(name, tasks)| {
            json!({
                "name": name,
                "count": tasks.len(),
                "items": numbered(tasks),
            })
        })
        .collect();
    let output = json!({
        "count": groups.len(),
        "categories": categories,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format stats as JSON
///
/// # Errors
///
/// Returns `MarktaskError::Json` if JSON serialization fails.
pub fn format_stats_json(stats: &TaskStats) -> Result<String, MarktaskError> {
    Ok(serde_json::to_string_pretty(stats)?)
}
