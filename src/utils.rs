//! Small helpers shared across tools: paths, privileges and subprocesses.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Current user's home directory.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Helper to expand paths with ~ to standard `PathBuf`
#[must_use]
pub fn expand_home(path_str: &str) -> PathBuf {
    if let Some(stripped) = path_str.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path_str)
}

/// Whether the process runs with an effective UID of 0.
#[cfg(unix)]
#[must_use]
#[allow(unsafe_code)]
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_root() -> bool {
    false
}

/// Run a command and return its stdout as a trimmed string.
pub fn cmd_stdout(cmd: &str, args: &[&str]) -> Option<String> {
    tracing::trace!(cmd, ?args, "running command");
    let output = Command::new(cmd).args(args).output().ok()?;
    if output.status.success() {
        let s = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    } else {
        None
    }
}

/// Pipe `text` to a command's stdin.
pub fn pipe_to_command(cmd: &str, args: &[&str], text: &str) -> Option<()> {
    tracing::trace!(cmd, ?args, "piping to command");
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).ok()?;
    }

    let status = child.wait().ok()?;
    status.success().then_some(())
}
