//! Path resolution for marktask configuration and data files.
//!
//! All marktask data is stored in `~/.marktask/` unless `MARKTASK_HOME`
//! points elsewhere:
//! - `config.yaml` - Main configuration file
//! - `tasks.json` - Active tasks, in order
//! - `done_tasks.json` - Completed tasks

use std::path::{Path, PathBuf};

use crate::error::MarktaskError;

/// Environment variable overriding the root directory.
pub const HOME_ENV: &str = "MARKTASK_HOME";

/// Paths to marktask configuration and data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root directory: `~/.marktask/`
    pub root: PathBuf,
    /// Config file: `~/.marktask/config.yaml`
    pub config_file: PathBuf,
    /// Active tasks: `~/.marktask/tasks.json`
    pub tasks_file: PathBuf,
    /// Completed tasks: `~/.marktask/done_tasks.json`
    pub done_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `MARKTASK_HOME`, falling back to `~/.marktask`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, MarktaskError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            MarktaskError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".marktask")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            tasks_file: root.join("tasks.json"),
            done_file: root.join("done_tasks.json"),
            root,
        }
    }

    /// Keep the config file where it is but store task files in `dir`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.tasks_file = dir.join("tasks.json");
        self.done_file = dir.join("done_tasks.json");
        self
    }

    /// Directory holding the task files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.tasks_file.parent().unwrap_or(&self.root)
    }
}
