use std::fmt::Write;

use chrono::NaiveDate;
use colored::{ColoredString, Colorize};

use crate::core::Schedulable;
use crate::features::stats::TaskStats;
use crate::tasks::{Priority, TaskDraft, TaskRecord};

fn priority_badge(priority: Priority) -> ColoredString {
    let label = format!("!{priority}");
    match priority {
        Priority::Urgent => label.red().bold(),
        Priority::Today => label.yellow(),
        Priority::Tomorrow => label.cyan(),
        Priority::Later => label.dimmed(),
        Priority::None => String::new().normal(),
    }
}

/// One line per task: id, description, then any annotations.
fn task_line(id: usize, task: &TaskRecord, today: NaiveDate) -> String {
    let mut line = format!("{} {}", format!("{id:>3}.").dimmed(), task.description.bold());

    if !task.category.is_empty() {
        write!(line, "  {}", format!("@{}", task.category).blue()).ok();
    }
    if !task.priority.is_none() {
        write!(line, "  {}", priority_badge(task.priority)).ok();
    }
    if task.is_recurring() {
        write!(line, "  {}", format!("~{}", task.recurring).magenta()).ok();
    }
    if let Some(due) = &task.due {
        let due = format!("^{due}");
        let due = if task.is_overdue(today) {
            due.red().bold()
        } else if task.is_due(today) {
            due.yellow().bold()
        } else if task.is_due_within(7, today) {
            due.yellow()
        } else {
            due.normal()
        };
        write!(line, "  {due}").ok();
    }

    line
}

/// Format numbered tasks as a pretty list
pub fn format_tasks_pretty(tasks: &[(usize, &TaskRecord)], title: &str, today: NaiveDate) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No tasks");
    }

    let mut output = format!("{} ({} items)\n", title.bold(), tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for &(id, task) in tasks {
        output.push_str(&task_line(id, task, today));
        output.push('\n');
    }

    output
}

/// Format a single task as pretty output
pub fn format_task_pretty(id: usize, task: &TaskRecord) -> String {
    let mut output = format!("{}\n", task.description.bold());
    writeln!(output, "  {}: {id}", "ID".dimmed()).ok();
    writeln!(output, "  {}: {}", "Category".dimmed(), task.category_label()).ok();

    if !task.priority.is_none() {
        writeln!(output, "  {}: {}", "Priority".dimmed(), task.priority).ok();
    }
    if task.is_recurring() {
        writeln!(output, "  {}: {}", "Recurring".dimmed(), task.recurring).ok();
    }
    if let Some(due) = &task.due {
        writeln!(output, "  {}: {due}", "Due".dimmed()).ok();
    }
    if let Some(last_done) = &task.last_done {
        writeln!(output, "  {}: {last_done}", "Last done".dimmed()).ok();
    }

    output
}

/// Format parsed drafts for parse-only mode
pub fn format_drafts_pretty(drafts: &[TaskDraft]) -> String {
    let mut output = format!(
        "{}\n",
        format!("Parsed {} task(s) (not created)", drafts.len())
            .yellow()
            .bold()
    );

    for (index, draft) in drafts.iter().enumerate() {
        writeln!(
            output,
            "{:>3}. {} {}",
            index + 1,
            "Description:".cyan().bold(),
            draft.description
        )
        .ok();
        if !draft.category.is_empty() {
            writeln!(output, "     {} {}", "Category:".blue(), draft.category).ok();
        }
        if !draft.priority.is_none() {
            writeln!(output, "     {} {}", "Priority:".red().bold(), draft.priority).ok();
        }
        if !draft.recurring.is_none() {
            writeln!(output, "     {} {}", "Recurring:".magenta(), draft.recurring).ok();
        }
        if !draft.due_text.is_empty() {
            writeln!(output, "     {} {}", "Due:".yellow(), draft.due_text).ok();
        }
    }

    output
}

/// Format category groups as pretty output
pub fn format_categories_pretty(
    groups: &[(String, Vec<(usize, &TaskRecord)>)],
    today: NaiveDate,
) -> String {
    if groups.is_empty() {
        return "Categories (0)\n  No tasks".to_string();
    }

    let mut output = format!("Categories ({})\n", groups.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for (name, tasks) in groups {
        writeln!(output, "{} ({})", name.blue().bold(), tasks.len()).ok();
        for &(id, task) in tasks {
            writeln!(output, "  {}", task_line(id, task, today)).ok();
        }
    }

    output
}

/// Format stats as pretty output
pub fn format_stats_pretty(stats: &TaskStats) -> String {
    let overdue = if stats.overdue > 0 {
        stats.overdue.to_string().red().bold()
    } else {
        "0".green()
    };

    let mut output = format!("{}\n", "Task Stats".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');
    writeln!(output, "  Active:     {}", stats.active.to_string().cyan()).ok();
    writeln!(output, "  Urgent:     {}", stats.urgent.to_string().red()).ok();
    writeln!(output, "  Today:      {}", stats.today.to_string().yellow()).ok();
    writeln!(output, "  Overdue:    {overdue}").ok();
    writeln!(output, "  Completed:  {}", stats.completed.to_string().green()).ok();

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{DueDate, Recurrence};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn make_task(name: &str) -> TaskRecord {
        TaskRecord {
            category: "work".to_string(),
            priority: Priority::Urgent,
            recurring: Recurrence::Weekly,
            due: Some(DueDate::Date("2024-01-10".parse().unwrap())),
            ..TaskRecord::new(name)
        }
    }

    #[test]
    fn test_format_tasks_pretty_empty() {
        let result = format_tasks_pretty(&[], "Tasks", today());
        assert!(result.contains("Tasks (0 items)"));
        assert!(result.contains("No tasks"));
    }

    #[test]
    fn test_format_tasks_pretty() {
        colored::control::set_override(false);
        let task = make_task("Write report");
        let result = format_tasks_pretty(&[(2, &task)], "Tasks", today());

        assert!(result.contains("(1 items)"));
        assert!(result.contains("2. Write report"));
        assert!(result.contains("@work"));
        assert!(result.contains("!urgent"));
        assert!(result.contains("~weekly"));
        assert!(result.contains("^2024-01-10"));
    }

    #[test]
    fn test_format_task_pretty() {
        let task = TaskRecord::new("Plain");
        let result = format_task_pretty(5, &task);

        assert!(result.contains("Plain"));
        assert!(result.contains("Uncategorized"));
        assert!(!result.contains("Priority"));
        assert!(!result.contains("Due"));
    }

    #[test]
    fn test_format_drafts_pretty() {
        let drafts = vec![TaskDraft {
            description: "Buy milk".to_string(),
            category: "shopping".to_string(),
            due_text: "tomorrow".to_string(),
            ..TaskDraft::default()
        }];
        let result = format_drafts_pretty(&drafts);

        assert!(result.contains("not created"));
        assert!(result.contains("Buy milk"));
        assert!(result.contains("shopping"));
        assert!(result.contains("tomorrow"));
        assert!(!result.contains("Recurring"));
    }

    #[test]
    fn test_format_categories_pretty() {
        let task = make_task("a");
        let groups = vec![("work".to_string(), vec![(1, &task)])];
        let result = format_categories_pretty(&groups, today());

        assert!(result.contains("Categories (1)"));
        assert!(result.contains("work"));
        assert!(result.contains("a"));
    }

    #[test]
    fn test_format_stats_pretty() {
        let stats = TaskStats {
            active: 3,
            completed: 7,
            ..TaskStats::default()
        };
        let result = format_stats_pretty(&stats);

        assert!(result.contains("Active"));
        assert!(result.contains('3'));
        assert!(result.contains('7'));
    }
}
