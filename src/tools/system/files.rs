//! Filename search, line search and tarball compression.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use regex::Regex;
use walkdir::WalkDir;

use crate::tools::security::archive;
use crate::{constants, output};

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).wrap_err_with(|| format!("Invalid regex: {pattern}"))
}

/// Files under `root` whose name contains a match for `pattern`.
///
/// Unreadable directories are skipped.
#[must_use]
pub fn matching_files(root: &Path, pattern: &Regex) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| pattern.is_match(&entry.file_name().to_string_lossy()))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Prints every file below `root` whose name matches `pattern`.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid regex.
pub fn find_file(out: &mut dyn Write, pattern: &str, root: &Path) -> Result<()> {
    let regex = compile(pattern)?;
    let found = matching_files(root, &regex);
    if found.is_empty() {
        output::notice(out, constants::MSG_NO_FILES_MATCHED)?;
    }
    for path in found {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

/// `(line number, line)` pairs of `text` that match `pattern`, 1-based,
/// with trailing whitespace removed.
#[must_use]
pub fn matching_lines<'a>(text: &'a str, pattern: &Regex) -> Vec<(usize, &'a str)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| pattern.is_match(line))
        .map(|(i, line)| (i + 1, line.trim_end()))
        .collect()
}

/// Prints `n: line` for each line of `file` matching `pattern`.
///
/// # Errors
///
/// Returns an error on an invalid regex or an unreadable file.
pub fn grep(out: &mut dyn Write, pattern: &str, file: &Path) -> Result<()> {
    let regex = compile(pattern)?;
    let bytes = fs::read(file).wrap_err_with(|| format!("Failed to read {}", file.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    for (number, line) in matching_lines(&text, &regex) {
        writeln!(out, "{number}: {line}")?;
    }
    Ok(())
}

/// Compresses a file or directory into a `tar.gz` at `dest`.
///
/// # Errors
///
/// Returns an error if `source` does not exist or writing fails.
pub fn compress(out: &mut dyn Write, source: &Path, dest: &Path) -> Result<()> {
    archive::write_tar_gz(source, dest).wrap_err("Compression failed")?;
    output::success(out, &format!("{}{}", constants::MSG_ARCHIVE_CREATED, dest.display()))?;
    Ok(())
}
