//! Append-only timestamped notes file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Notes stored one per line as `[YYYY-MM-DD HH:MM:SS] text`.
#[derive(Debug, Clone)]
pub struct NoteBook {
    path: PathBuf,
}

impl NoteBook {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Appends a note stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn add(&self, text: &str) -> Result<()> {
        self.add_at(text, Local::now())
    }

    /// Appends a note with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn add_at(&self, text: &str, at: DateTime<Local>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .wrap_err_with(|| format!("Failed to open {}", self.path.display()))?;
        writeln!(file, "{}", format_note(text, at))?;
        Ok(())
    }

    /// Full notes file contents, or `None` if no note was ever written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .wrap_err_with(|| format!("Failed to read {}", self.path.display()))
    }
}

fn format_note(text: &str, at: DateTime<Local>) -> String {
    format!("[{}] {text}", at.format(TIMESTAMP_FORMAT))
}
