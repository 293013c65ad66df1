//! JSON-backed task lists.
//!
//! Active tasks live in `tasks.json` and completed tasks in
//! `done_tasks.json`, both as pretty-printed arrays. A task's id is its
//! 1-based position in the active list; there is no stored identifier, so
//! ids shift after a delete, completion or move.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::Paths;
use crate::core::{CanonicalDate, ResolveDate};
use crate::error::MarktaskError;
use crate::tasks::{DueDate, Priority, Recurrence, TaskRecord};

/// Fields for creating a task without the inline syntax.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub recurring: Recurrence,
    /// Stored as given; not resolved.
    pub due: String,
}

/// A partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub recurring: Option<Recurrence>,
    /// Empty clears the due date.
    pub due: Option<String>,
}

impl TaskUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.recurring.is_none()
            && self.due.is_none()
    }
}

/// Active and completed task lists, loaded in memory.
///
/// Mutations only touch memory; call [`TaskStore::save`] to write both files.
#[derive(Debug)]
pub struct TaskStore {
    tasks_file: PathBuf,
    done_file: PathBuf,
    tasks: Vec<TaskRecord>,
    completed: Vec<TaskRecord>,
}

impl TaskStore {
    /// Load the task lists from the given paths.
    ///
    /// # Errors
    ///
    /// Returns an error if a task file exists but cannot be read or parsed.
    pub fn open(paths: &Paths) -> Result<Self, MarktaskError> {
        Self::open_at(&paths.tasks_file, &paths.done_file)
    }

    /// Load the task lists from specific files.
    ///
    /// Missing files load as empty lists.
    ///
    /// # Errors
    ///
    /// Returns an error if a task file exists but cannot be read or parsed.
    pub fn open_at(tasks_file: &Path, done_file: &Path) -> Result<Self, MarktaskError> {
        let tasks = load_list(tasks_file)?;
        let completed = load_list(done_file)?;
        log::debug!(
            "Loaded {} active and {} completed task(s)",
            tasks.len(),
            completed.len()
        );

        Ok(Self {
            tasks_file: tasks_file.to_path_buf(),
            done_file: done_file.to_path_buf(),
            tasks,
            completed,
        })
    }

    /// Write both task lists.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self) -> Result<(), MarktaskError> {
        save_list(&self.tasks_file, &self.tasks)?;
        save_list(&self.done_file, &self.completed)?;
        log::info!(
            "Saved {} active and {} completed task(s)",
            self.tasks.len(),
            self.completed.len()
        );
        Ok(())
    }

    /// Active tasks in order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    /// Completed tasks, oldest first.
    #[must_use]
    pub fn completed(&self) -> &[TaskRecord] {
        &self.completed
    }

    /// Get an active task by its 1-based id.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::NotFound` if the id is out of range.
    pub fn get(&self, id: usize) -> Result<&TaskRecord, MarktaskError> {
        let index = self.index(id)?;
        Ok(&self.tasks[index])
    }

    /// Append parsed tasks in order, returning the appended slice.
    pub fn add(&mut self, records: Vec<TaskRecord>) -> &[TaskRecord] {
        let start = self.tasks.len();
        self.tasks.extend(records);
        log::debug!("Appended {} task(s)", self.tasks.len() - start);
        &self.tasks[start..]
    }

    /// Create a task from explicit fields.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::MissingDescription` if the description is blank.
    pub fn add_direct(&mut self, new: NewTask) -> Result<&TaskRecord, MarktaskError> {
        let description = new.description.trim();
        if description.is_empty() {
            return Err(MarktaskError::MissingDescription);
        }

        let record = TaskRecord {
            category: new.category.trim().to_string(),
            priority: new.priority,
            recurring: new.recurring,
            due: DueDate::from_text(&new.due),
            ..TaskRecord::new(description)
        };
        self.tasks.push(record);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Apply a partial update to an active task.
    ///
    /// New due text is resolved against `now`. Text that does not resolve is
    /// stored as raw text rather than dropped.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::NotFound` for a bad id, or
    /// `MarktaskError::MissingDescription` if the new description is blank.
    pub fn update<R: ResolveDate + ?Sized>(
        &mut self,
        id: usize,
        update: TaskUpdate,
        now: NaiveDateTime,
        resolver: &R,
    ) -> Result<&TaskRecord, MarktaskError> {
        let index = self.index(id)?;

        let description = match update.description {
            Some(d) if d.trim().is_empty() => return Err(MarktaskError::MissingDescription),
            Some(d) => Some(d.trim().to_string()),
            None => None,
        };

        let task = &mut self.tasks[index];
        if let Some(description) = description {
            task.description = description;
        }
        if let Some(category) = update.category {
            task.category = category.trim().to_string();
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(recurring) = update.recurring {
            task.recurring = recurring;
        }
        if let Some(due) = update.due {
            let due = due.trim();
            task.due = if due.is_empty() {
                None
            } else if let Some(date) = resolver.resolve(due, now) {
                Some(DueDate::Date(date))
            } else {
                log::debug!("Keeping unresolved due text {due:?} for task {id}");
                Some(DueDate::Raw(due.to_string()))
            };
        }

        Ok(task)
    }

    /// Remove an active task.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::NotFound` if the id is out of range.
    pub fn delete(&mut self, id: usize) -> Result<TaskRecord, MarktaskError> {
        let index = self.index(id)?;
        Ok(self.tasks.remove(index))
    }

    /// Move an active task to the completed list.
    ///
    /// Recurring tasks record `today` as their `last_done` date.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::NotFound` if the id is out of range.
    pub fn complete(&mut self, id: usize, today: NaiveDate) -> Result<&TaskRecord, MarktaskError> {
        let index = self.index(id)?;
        let mut task = self.tasks.remove(index);
        if task.is_recurring() {
            task.last_done = Some(CanonicalDate::new(today));
        }
        self.completed.push(task);
        Ok(&self.completed[self.completed.len() - 1])
    }

    /// Group active tasks by category label, in first-seen order.
    ///
    /// Each task is paired with its id.
    #[must_use]
    pub fn by_category(&self) -> Vec<(String, Vec<(usize, &TaskRecord)>)> {
        let mut groups: Vec<(String, Vec<(usize, &TaskRecord)>)> = Vec::new();
        for (index, task) in self.tasks.iter().enumerate() {
            let label = task.category_label();
            match groups.iter_mut().find(|(name, _)| name == label) {
                Some((_, members)) => members.push((index + 1, task)),
                None => groups.push((label.to_string(), vec![(index + 1, task)])),
            }
        }
        groups
    }

    /// Replace the active list with a new ordering.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::EmptyReorder` if `tasks` is empty.
    pub fn reorder(&mut self, tasks: Vec<TaskRecord>) -> Result<(), MarktaskError> {
        if tasks.is_empty() {
            return Err(MarktaskError::EmptyReorder);
        }
        self.tasks = tasks;
        Ok(())
    }

    /// Move one active task from position `from` to position `to`.
    ///
    /// # Errors
    ///
    /// Returns `MarktaskError::NotFound` if either id is out of range.
    pub fn move_task(&mut self, from: usize, to: usize) -> Result<&TaskRecord, MarktaskError> {
        let from_index = self.index(from)?;
        let to_index = self.index(to)?;
        let task = self.tasks.remove(from_index);
        self.tasks.insert(to_index, task);
        Ok(&self.tasks[to_index])
    }

    fn index(&self, id: usize) -> Result<usize, MarktaskError> {
        if id == 0 || id > self.tasks.len() {
            return Err(MarktaskError::NotFound(id));
        }
        Ok(id - 1)
    }
}

fn load_list(path: &Path) -> Result<Vec<TaskRecord>, MarktaskError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).map_err(|e| {
        log::error!("Could not parse {}: {e}", path.display());
        MarktaskError::Json(e)
    })
}

fn save_list(path: &Path, tasks: &[TaskRecord]) -> Result<(), MarktaskError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let mut content = serde_json::to_string_pretty(tasks)?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DateResolver, Schedulable};
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn store_in(dir: &TempDir) -> TaskStore {
        TaskStore::open(&Paths::with_root(dir.path().to_path_buf())).unwrap()
    }

    fn store_with(dir: &TempDir, names: &[&str]) -> TaskStore {
        let mut store = store_in(dir);
        store.add(names.iter().map(|n| TaskRecord::new(*n)).collect());
        store
    }

    fn names(tasks: &[TaskRecord]) -> Vec<&str> {
        tasks.iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn test_open_missing_files() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.tasks().is_empty());
        assert!(store.completed().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, &["a", "b"]);
        store.complete(1, now().date()).unwrap();
        store.save().unwrap();

        let reloaded = store_in(&dir);
        assert_eq!(names(reloaded.tasks()), vec!["b"]);
        assert_eq!(names(reloaded.completed()), vec!["a"]);
    }

    #[test]
    fn test_saved_format_uses_empty_strings_and_null() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &["a"]);
        store.save().unwrap();

        let content = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
        assert!(content.contains("\"priority\": \"\""));
        assert!(content.contains("\"due\": null"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tasks.json"), "{not json").unwrap();

        let result = TaskStore::open(&Paths::with_root(dir.path().to_path_buf()));
        assert!(matches!(result, Err(MarktaskError::Json(_))));
    }

    #[test]
    fn test_add_returns_appended() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, &["a"]);
        let added = store.add(vec![TaskRecord::new("b"), TaskRecord::new("c")]);
        assert_eq!(names(added), vec!["b", "c"]);
        assert_eq!(store.tasks().len(), 3);
    }

    #[test]
    fn test_add_direct() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let task = store
            .add_direct(NewTask {
                description: "  Call mom ".to_string(),
                category: " family ".to_string(),
                priority: Priority::Today,
                due: "sometime".to_string(),
                ..NewTask::default()
            })
            .unwrap();

        assert_eq!(task.description, "Call mom");
        assert_eq!(task.category, "family");
        assert_eq!(task.due, Some(DueDate::Raw("sometime".to_string())));

        let err = store.add_direct(NewTask::default()).unwrap_err();
        assert!(matches!(err, MarktaskError::MissingDescription));
    }

    #[test]
    fn test_update_resolves_due() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, &["a"]);
        let resolver = DateResolver::default();

        let update = TaskUpdate {
            due: Some("tomorrow".to_string()),
            priority: Some(Priority::Urgent),
            ..TaskUpdate::default()
        };
        let task = store.update(1, update, now(), &resolver).unwrap();

        assert_eq!(task.due, Some(DueDate::Date("2024-01-16".parse().unwrap())));
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.description, "a");
    }

    #[test]
    fn test_update_keeps_unresolved_due_text() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, &["a"]);
        let resolver = DateResolver::default();

        let update = TaskUpdate {
            due: Some("when pigs fly".to_string()),
            ..TaskUpdate::default()
        };
        let task = store.update(1, update, now(), &resolver).unwrap();

        assert_eq!(task.due, Some(DueDate::Raw("when pigs fly".to_string())));
        assert_eq!(task.due_date(), None);
    }

    #[test]
    fn test_update_clears_due() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, &["a"]);
        let resolver = DateResolver::default();
        let set = TaskUpdate {
            due: Some("friday".to_string()),
            ..TaskUpdate::default()
        };
        store.update(1, set, now(), &resolver).unwrap();

        let clear = TaskUpdate {
            due: Some(String::new()),
            ..TaskUpdate::default()
        };
        let task = store.update(1, clear, now(), &resolver).unwrap();
        assert_eq!(task.due, None);
    }

    #[test]
    fn test_update_rejects_blank_description() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, &["a"]);
        let update = TaskUpdate {
            description: Some("  ".to_string()),
            ..TaskUpdate::default()
        };

        let err = store
            .update(1, update, now(), &DateResolver::default())
            .unwrap_err();
        assert!(matches!(err, MarktaskError::MissingDescription));
        assert_eq!(store.get(1).unwrap().description, "a");
    }

    #[test]
    fn test_ids_are_one_based() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, &["a", "b"]);

        assert_eq!(store.get(1).unwrap().description, "a");
        assert!(matches!(store.get(0), Err(MarktaskError::NotFound(0))));
        assert!(matches!(store.delete(3), Err(MarktaskError::NotFound(3))));
    }

    #[test]
    fn test_delete_shifts_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, &["a", "b", "c"]);

        let removed = store.delete(1).unwrap();
        assert_eq!(removed.description, "a");
        assert_eq!(store.get(1).unwrap().description, "b");
    }

    #[test]
    fn test_complete_recurring_sets_last_done() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add(vec![
            TaskRecord {
                recurring: Recurrence::Daily,
                ..TaskRecord::new("standup")
            },
            TaskRecord::new("once"),
        ]);

        let done = store.complete(1, now().date()).unwrap();
        assert_eq!(done.last_done.map(|d| d.to_string()), Some("2024-01-15".to_string()));

        let done = store.complete(1, now().date()).unwrap();
        assert_eq!(done.last_done, None);
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_by_category() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add(vec![
            TaskRecord {
                category: "work".to_string(),
                ..TaskRecord::new("a")
            },
            TaskRecord::new("b"),
            TaskRecord {
                category: "work".to_string(),
                ..TaskRecord::new("c")
            },
        ]);

        let groups = store.by_category();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "work");
        let ids: Vec<usize> = groups[0].1.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(groups[1].0, "Uncategorized");
    }

    #[test]
    fn test_reorder() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, &["a", "b"]);

        let reversed: Vec<TaskRecord> = store.tasks().iter().rev().cloned().collect();
        store.reorder(reversed).unwrap();
        assert_eq!(names(store.tasks()), vec!["b", "a"]);

        assert!(matches!(store.reorder(Vec::new()), Err(MarktaskError::EmptyReorder)));
    }

    #[test]
    fn test_move_task() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, &["a", "b", "c", "d"]);

        store.move_task(4, 1).unwrap();
        assert_eq!(names(store.tasks()), vec!["d", "a", "b", "c"]);

        store.move_task(1, 3).unwrap();
        assert_eq!(names(store.tasks()), vec!["a", "b", "d", "c"]);

        assert!(store.move_task(1, 5).is_err());
        assert_eq!(names(store.tasks()), vec!["a", "b", "d", "c"]);
    }
}
