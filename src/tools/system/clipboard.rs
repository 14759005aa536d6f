//! Clipboard access through the platform's command-line utilities.

use std::io::Write;

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::utils::{cmd_stdout, pipe_to_command};
use crate::{constants, output};

type Candidate = (&'static str, &'static [&'static str]);

/// Commands that accept clipboard text on stdin, in preference order.
#[cfg(target_os = "macos")]
const COPY_COMMANDS: &[Candidate] = &[("pbcopy", &[])];
#[cfg(windows)]
const COPY_COMMANDS: &[Candidate] = &[("clip", &[])];
#[cfg(not(any(target_os = "macos", windows)))]
const COPY_COMMANDS: &[Candidate] = &[
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Commands that print the clipboard contents, in preference order.
#[cfg(target_os = "macos")]
const PASTE_COMMANDS: &[Candidate] = &[("pbpaste", &[])];
#[cfg(windows)]
const PASTE_COMMANDS: &[Candidate] = &[("powershell", &["-NoProfile", "-Command", "Get-Clipboard"])];
#[cfg(not(any(target_os = "macos", windows)))]
const PASTE_COMMANDS: &[Candidate] = &[
    ("xclip", &["-selection", "clipboard", "-o"]),
    ("xsel", &["--clipboard", "--output"]),
];

/// Copies `text` with the first clipboard utility that accepts it.
///
/// # Errors
///
/// Returns an error when no clipboard utility is available.
pub fn copy(out: &mut dyn Write, text: &str) -> Result<()> {
    COPY_COMMANDS
        .iter()
        .find_map(|(cmd, args)| pipe_to_command(cmd, args, text))
        .ok_or_else(|| eyre!(constants::ERR_NO_CLIPBOARD))?;
    output::success(out, constants::MSG_CLIPBOARD_COPIED)?;
    Ok(())
}

/// Prints the clipboard contents.
///
/// # Errors
///
/// Returns an error when no clipboard utility is available.
pub fn paste(out: &mut dyn Write) -> Result<()> {
    let text = PASTE_COMMANDS
        .iter()
        .find_map(|(cmd, args)| cmd_stdout(cmd, args))
        .ok_or_else(|| eyre!(constants::ERR_NO_CLIPBOARD))?;
    writeln!(out, "{text}")?;
    Ok(())
}
