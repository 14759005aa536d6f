//! Archive writers shared by `backup`, `compress` and `zip-encrypt`.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use walkdir::WalkDir;
use zip::unstable::write::FileOptionsExt;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::{constants, output};

/// Last path component of `source`, used as the archive root name.
fn root_name(source: &Path) -> Result<PathBuf> {
    let absolute = source
        .canonicalize()
        .wrap_err_with(|| format!("Path not found: {}", source.display()))?;
    absolute
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| eyre!("Cannot archive {}", source.display()))
}

/// One entry below a source directory.
struct SourceEntry {
    path: PathBuf,
    /// `/`-separated path relative to the source directory.
    name: String,
    is_dir: bool,
}

/// Walks `dir` in name order, leaving out `skip` (the archive being
/// written, when it lives inside the tree).
fn walk_source(dir: &Path, skip: Option<&Path>) -> Result<Vec<SourceEntry>> {
    let dir = dir
        .canonicalize()
        .wrap_err_with(|| format!("Path not found: {}", dir.display()))?;
    let mut entries = Vec::new();
    for entry in WalkDir::new(&dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if skip == Some(entry.path()) {
            tracing::debug!(path = %entry.path().display(), "skipping archive being written");
            continue;
        }
        let name = entry
            .path()
            .strip_prefix(&dir)?
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        entries.push(SourceEntry {
            path: entry.path().to_path_buf(),
            name,
            is_dir: entry.file_type().is_dir(),
        });
    }
    Ok(entries)
}

/// Creates `output` and returns it with its canonical path.
fn create_output(output: &Path) -> Result<(File, PathBuf)> {
    let file = File::create(output)
        .wrap_err_with(|| format!("Failed to create {}", output.display()))?;
    let canonical = output.canonicalize()?;
    Ok((file, canonical))
}

/// Writes `source` (file or directory) to a gzip-compressed tarball at
/// `output`, stored under the source's own name.
///
/// # Errors
///
/// Returns an error if `source` does not exist or the archive cannot be
/// written.
pub fn write_tar_gz(source: &Path, output: &Path) -> Result<()> {
    let name = root_name(source)?;
    tracing::debug!(source = %source.display(), output = %output.display(), "writing tar.gz");

    let (file, written) = create_output(output)?;
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    if source.is_dir() {
        builder.append_dir(&name, source)?;
        for entry in walk_source(source, Some(&written))? {
            let entry_name = name.join(&entry.name);
            if entry.is_dir {
                builder.append_dir(&entry_name, &entry.path)?;
            } else {
                builder.append_path_with_name(&entry.path, &entry_name)?;
            }
        }
    } else {
        builder.append_path_with_name(source, &name)?;
    }
    builder.into_inner()?.finish()?;
    Ok(())
}

/// Archives a directory into a `tar.gz` at `dest`.
///
/// # Errors
///
/// Returns an error if `source` is not a directory or writing fails.
pub fn backup(out: &mut dyn Write, source: &Path, dest: &Path) -> Result<()> {
    if !source.is_dir() {
        bail!("Source must be a directory: {}", source.display());
    }
    write_tar_gz(source, dest).wrap_err("Backup failed")?;
    output::success(out, &format!("{}{}", constants::MSG_BACKUP_CREATED, dest.display()))?;
    Ok(())
}

/// Files to place in a zip, paired with their entry names.
///
/// A single file is stored under its file name; a directory contributes
/// every entry below it with paths relative to it, except `skip`.
fn zip_entries(source: &Path, skip: Option<&Path>) -> Result<Vec<(PathBuf, String, bool)>> {
    if source.is_file() {
        let name = root_name(source)?;
        return Ok(vec![(source.to_path_buf(), name.to_string_lossy().into_owned(), false)]);
    }
    if !source.is_dir() {
        bail!("Path not found: {}", source.display());
    }
    Ok(walk_source(source, skip)?
        .into_iter()
        .map(|entry| (entry.path, entry.name, entry.is_dir))
        .collect())
}

/// Writes a Deflate-compressed zip whose entries are encrypted with the
/// traditional PKWARE scheme.
///
/// # Errors
///
/// Returns an error for an empty password, a missing source, or any write
/// failure.
pub fn write_encrypted_zip(source: &Path, output: &Path, password: &str) -> Result<()> {
    if password.is_empty() {
        bail!("Password must not be empty.");
    }
    if !source.exists() {
        bail!("Path not found: {}", source.display());
    }

    let (file, written) = create_output(output)?;
    let entries = zip_entries(source, Some(&written))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .with_deprecated_encryption(password.as_bytes());

    for (path, name, is_dir) in entries {
        if is_dir {
            zip.add_directory(name, options)?;
            continue;
        }
        tracing::debug!(entry = %name, "adding");
        zip.start_file(name, options)?;
        let mut reader = BufReader::new(File::open(&path)?);
        io::copy(&mut reader, &mut zip)?;
    }
    zip.finish()?;
    Ok(())
}

/// Creates a password-protected zip of `source` at `dest`.
///
/// # Errors
///
/// Returns an error for an empty password, a missing source, or any write
/// failure.
pub fn zip_encrypt(out: &mut dyn Write, source: &Path, dest: &Path, password: &str) -> Result<()> {
    write_encrypted_zip(source, dest, password)?;
    output::success(out, &format!("{}{}", constants::MSG_ARCHIVE_CREATED, dest.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::fs;

    fn tar_names(path: &Path) -> Vec<String> {
        let mut archive = tar::Archive::new(GzDecoder::new(File::open(path).unwrap()));
        let mut names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| {
                e.unwrap()
                    .path()
                    .unwrap()
                    .to_string_lossy()
                    .trim_end_matches('/')
                    .to_string()
            })
            .collect();
        names.sort();
        names
    }

    fn sample_tree(root: &Path) -> PathBuf {
        let project = root.join("project");
        fs::create_dir_all(project.join("src")).unwrap();
        fs::write(project.join("README"), "readme").unwrap();
        fs::write(project.join("src").join("main.txt"), "main").unwrap();
        project
    }

    #[test]
    fn test_tar_gz_of_directory_uses_directory_name() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_tree(dir.path());
        let archive = dir.path().join("out.tar.gz");

        write_tar_gz(&project, &archive).unwrap();
        let names = tar_names(&archive);
        assert!(names.contains(&"project/README".to_string()));
        assert!(names.contains(&"project/src/main.txt".to_string()));
        assert!(names.iter().all(|n| n.starts_with("project")));
    }

    #[test]
    fn test_tar_gz_of_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "hello").unwrap();
        let archive = dir.path().join("notes.tar.gz");

        write_tar_gz(&file, &archive).unwrap();
        assert_eq!(tar_names(&archive), vec!["notes.txt"]);
    }

    #[test]
    fn test_backup_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, "x").unwrap();

        let mut out = Vec::new();
        let err = backup(&mut out, &file, &dir.path().join("b.tar.gz")).unwrap_err();
        assert!(err.to_string().contains("must be a directory"));
    }

    #[test]
    fn test_backup_reports_destination() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_tree(dir.path());
        let dest = dir.path().join("backup.tar.gz");

        let mut out = Vec::new();
        backup(&mut out, &project, &dest).unwrap();
        assert!(dest.exists());
        assert!(String::from_utf8(out).unwrap().contains("Backup created at "));
    }

    #[test]
    fn test_zip_entries_relative_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_tree(dir.path());

        let names: Vec<String> = zip_entries(&project, None)
            .unwrap()
            .into_iter()
            .map(|(_, name, _)| name)
            .collect();
        assert_eq!(names, vec!["README", "src", "src/main.txt"]);
    }

    #[test]
    fn test_encrypted_zip_marks_entries_encrypted() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_tree(dir.path());
        let archive = dir.path().join("secret.zip");

        write_encrypted_zip(&project, &archive, "hunter2").unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 3);
        assert!(zip.by_name("src/main.txt").is_err());

        let mut entry = zip.by_name_decrypt("src/main.txt", b"hunter2").unwrap();
        let mut content = String::new();
        io::Read::read_to_string(&mut entry, &mut content).unwrap();
        assert_eq!(content, "main");
    }

    #[test]
    fn test_encrypted_zip_rejects_empty_password() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, "x").unwrap();
        assert!(write_encrypted_zip(&file, &dir.path().join("f.zip"), "").is_err());
    }

    #[test]
    fn test_backup_inside_source_leaves_out_itself() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_tree(dir.path());
        let dest = project.join("zzz-backup.tar.gz");

        let mut out = Vec::new();
        backup(&mut out, &project, &dest).unwrap();
        assert_eq!(
            tar_names(&dest),
            vec!["project", "project/README", "project/src", "project/src/main.txt"]
        );
    }

    #[test]
    fn test_encrypted_zip_inside_source_leaves_out_itself() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_tree(dir.path());
        let archive = project.join("secret.zip");
        fs::write(&archive, "stale").unwrap();

        write_encrypted_zip(&project, &archive, "hunter2").unwrap();

        let zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let mut names: Vec<&str> = zip.file_names().map(|n| n.trim_end_matches('/')).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["README", "src", "src/main.txt"]);
    }
}
