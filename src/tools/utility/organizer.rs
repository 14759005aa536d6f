//! To-do list and notes commands.

use std::io::Write;
use std::path::Path;

use color_eyre::Result;

use crate::state::{NoteBook, TodoList};
use crate::{constants, output};

/// Appends a task and saves the list.
///
/// # Errors
///
/// Returns an error if the list cannot be saved.
pub fn todo_add(out: &mut dyn Write, path: &Path, task: &str) -> Result<()> {
    let mut list = TodoList::load(path);
    list.add(task);
    list.save()?;
    output::success(out, constants::MSG_TASK_ADDED)?;
    Ok(())
}

/// Prints the tasks numbered from 1.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn todo_list(out: &mut dyn Write, path: &Path) -> Result<()> {
    let list = TodoList::load(path);
    if list.tasks().is_empty() {
        output::notice(out, constants::MSG_NO_TASKS)?;
        return Ok(());
    }
    for (i, task) in list.tasks().iter().enumerate() {
        writeln!(out, "{}. {task}", i + 1)?;
    }
    Ok(())
}

/// Removes the task with the 1-based `number`.
///
/// # Errors
///
/// Returns an error for an out-of-range number or if saving fails.
pub fn todo_remove(out: &mut dyn Write, path: &Path, number: usize) -> Result<()> {
    let mut list = TodoList::load(path);
    let removed = list.remove(number)?;
    list.save()?;
    output::success(out, &format!("{}{removed}", constants::MSG_TASK_REMOVED))?;
    Ok(())
}

/// Appends a timestamped note.
///
/// # Errors
///
/// Returns an error if the notes file cannot be written.
pub fn notes_add(out: &mut dyn Write, path: &Path, text: &str) -> Result<()> {
    NoteBook::new(path).add(text)?;
    output::success(out, constants::MSG_NOTE_ADDED)?;
    Ok(())
}

/// Prints every note.
///
/// # Errors
///
/// Returns an error if the notes file exists but cannot be read.
pub fn notes_show(out: &mut dyn Write, path: &Path) -> Result<()> {
    match NoteBook::new(path).read()? {
        Some(text) => write!(out, "{text}")?,
        None => output::notice(out, constants::MSG_NO_NOTES)?,
    }
    Ok(())
}
