//! File hygiene: hidden file listing and overwrite-before-delete.

use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use rand::RngCore;

use crate::{constants, output};

/// Sorted names of the dot-files directly inside `dir`.
///
/// # Errors
///
/// Returns an error if `dir` is not a readable directory.
pub fn hidden_entries(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        bail!("Specified path is not a directory: {}", dir.display());
    }
    let mut names: Vec<String> = fs::read_dir(dir)
        .wrap_err_with(|| format!("Failed to read {}", dir.display()))?
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}

/// Prints hidden entries of `dir`, one per line.
///
/// # Errors
///
/// Returns an error if `dir` is not a readable directory.
pub fn list_hidden(out: &mut dyn Write, dir: &Path) -> Result<()> {
    let names = hidden_entries(dir)?;
    if names.is_empty() {
        output::notice(out, constants::MSG_NO_HIDDEN_FILES)?;
    }
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Overwrites every byte of `path` with random data and syncs it to disk.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, written or synced.
pub fn overwrite_with_random(path: &Path) -> Result<u64> {
    let size = fs::metadata(path)?.len();
    let mut file = OpenOptions::new()
        .write(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open {}", path.display()))?;
    file.seek(SeekFrom::Start(0))?;

    let mut rng = rand::rng();
    let mut buf = vec![0u8; constants::IO_CHUNK_SIZE];
    let mut remaining = size;
    while remaining > 0 {
        let n = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
        rng.fill_bytes(&mut buf[..n]);
        file.write_all(&buf[..n])?;
        remaining -= n as u64;
    }
    file.sync_all()?;
    Ok(size)
}

/// Overwrites `path` with random bytes, then removes it.
///
/// # Errors
///
/// Returns an error if `path` is not a regular file or any step fails.
pub fn secure_delete(out: &mut dyn Write, path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("Not a file: {}", path.display());
    }
    let size = overwrite_with_random(path).wrap_err("Failed to securely delete file")?;
    tracing::debug!(path = %path.display(), size, "overwritten");
    fs::remove_file(path).wrap_err("Failed to securely delete file")?;
    output::success(out, constants::MSG_SECURE_DELETED)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_entries_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".zshrc"), "").unwrap();
        fs::write(dir.path().join(".bashrc"), "").unwrap();
        fs::create_dir(dir.path().join(".config")).unwrap();
        fs::write(dir.path().join("visible.txt"), "").unwrap();

        assert_eq!(
            hidden_entries(dir.path()).unwrap(),
            vec![".bashrc", ".config", ".zshrc"]
        );
    }

    #[test]
    fn test_list_hidden_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        list_hidden(&mut out, dir.path()).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No hidden files found."));
    }

    #[test]
    fn test_list_hidden_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "x").unwrap();
        assert!(hidden_entries(&file).is_err());
    }

    #[test]
    fn test_overwrite_keeps_size_changes_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.txt");
        let original = vec![0u8; 20_000];
        fs::write(&path, &original).unwrap();

        assert_eq!(overwrite_with_random(&path).unwrap(), 20_000);
        let after = fs::read(&path).unwrap();
        assert_eq!(after.len(), original.len());
        assert_ne!(after, original);
    }

    #[test]
    fn test_secure_delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.txt");
        fs::write(&path, "top secret").unwrap();

        let mut out = Vec::new();
        secure_delete(&mut out, &path).unwrap();
        assert!(!path.exists());
        assert!(String::from_utf8(out).unwrap().contains("File securely deleted."));
    }

    #[test]
    fn test_secure_delete_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        assert!(secure_delete(&mut out, dir.path()).is_err());
    }
}
