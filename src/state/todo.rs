//! To-do list stored as a JSON array of strings.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;

/// Ordered task list backed by a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    path: PathBuf,
    tasks: Vec<String>,
}

impl TodoList {
    /// Loads the list from `path`.
    ///
    /// A missing file yields an empty list, as does a corrupt one (with a
    /// warning) so a damaged file never blocks adding new tasks.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let tasks = match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable to-do file");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        Self {
            path: path.to_path_buf(),
            tasks,
        }
    }

    /// Tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    /// Appends a task.
    pub fn add(&mut self, task: &str) {
        self.tasks.push(task.to_string());
    }

    /// Removes the task at the 1-based `number` and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if `number` is zero or past the end of the list.
    pub fn remove(&mut self, number: usize) -> Result<String> {
        if number == 0 || number > self.tasks.len() {
            bail!("Invalid task number: {number}");
        }
        Ok(self.tasks.remove(number - 1))
    }

    /// Writes the list back as pretty-printed JSON, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.tasks)?;
        fs::write(&self.path, json)
            .wrap_err_with(|| format!("Failed to write {}", self.path.display()))
    }
}
