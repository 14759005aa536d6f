//! Wrappers around the system `ping` and `traceroute` utilities.

use std::io::{self, Write};
use std::process::Command;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;

use crate::{constants, output};

/// Program and arguments for `ping` on this platform.
#[must_use]
pub fn ping_command(host: &str, count: u32) -> (&'static str, Vec<String>) {
    let flag = if cfg!(windows) { "-n" } else { "-c" };
    ("ping", vec![flag.to_string(), count.to_string(), host.to_string()])
}

/// Program and arguments for a route trace on this platform.
#[must_use]
pub fn traceroute_command(host: &str, max_hops: u32) -> (&'static str, Vec<String>) {
    if cfg!(windows) {
        ("tracert", vec!["-h".to_string(), max_hops.to_string(), host.to_string()])
    } else {
        ("traceroute", vec!["-m".to_string(), max_hops.to_string(), host.to_string()])
    }
}

/// Runs `program`, echoes its stdout, and reports whether it succeeded.
fn pass_through(out: &mut dyn Write, program: &str, args: &[String]) -> Result<bool> {
    tracing::debug!(program, ?args, "spawning");
    let result = Command::new(program).args(args).output();
    let output = match result {
        Ok(output) => output,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(eyre!("System '{program}' command not found."));
        }
        Err(e) => return Err(e).wrap_err_with(|| format!("Failed to run {program}")),
    };
    out.write_all(&output.stdout)?;
    if !output.stderr.is_empty() {
        tracing::debug!(stderr = %String::from_utf8_lossy(&output.stderr).trim(), "{program} stderr");
    }
    Ok(output.status.success())
}

/// Sends `count` echo requests through the system `ping`.
///
/// # Errors
///
/// Returns an error if `ping` is not installed. A failed ping is reported
/// but is not an error.
pub fn ping(out: &mut dyn Write, host: &str, count: u32) -> Result<()> {
    writeln!(out, "Pinging {host} with {count} packets...")?;
    let (program, args) = ping_command(host, count);
    if !pass_through(out, program, &args)? {
        output::failure(out, constants::MSG_PING_FAILED)?;
        if !crate::utils::is_root() {
            tracing::info!("some platforms require elevated privileges for ICMP");
        }
    }
    Ok(())
}

/// Traces the route to `host` through the system utility.
///
/// # Errors
///
/// Returns an error if the utility is not installed.
pub fn traceroute(out: &mut dyn Write, host: &str, max_hops: u32) -> Result<()> {
    writeln!(out, "Tracing route to {host} (max {max_hops} hops)...")?;
    let (program, args) = traceroute_command(host, max_hops);
    if !pass_through(out, program, &args)? {
        output::failure(out, constants::MSG_TRACEROUTE_FAILED)?;
    }
    Ok(())
}
