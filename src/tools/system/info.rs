//! Disk usage, process listing and host information.

use std::io::Write;
use std::path::Path;

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use sysinfo::System;

use crate::{output, utils};

const NOT_AVAILABLE: &str = "N/A";

/// Capacity figures for one filesystem, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskSpace {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

/// Space on the filesystem that holds `path`, queried with `statvfs`.
///
/// # Errors
///
/// Returns an error if `path` does not exist or cannot be queried.
#[cfg(unix)]
#[allow(unsafe_code, clippy::useless_conversion)]
pub fn disk_space(path: &Path) -> Result<DiskSpace> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .wrap_err_with(|| format!("Invalid path: {}", path.display()))?;
    // SAFETY: statvfs is plain old data, so an all-zero value is valid.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: c_path is NUL-terminated and stat is a valid out pointer.
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error())
            .wrap_err_with(|| format!("Path does not exist: {}", path.display()));
    }

    let fragment = u64::from(stat.f_frsize);
    let total = u64::from(stat.f_blocks) * fragment;
    let free = u64::from(stat.f_bavail) * fragment;
    let used = u64::from(stat.f_blocks).saturating_sub(u64::from(stat.f_bfree)) * fragment;
    tracing::debug!(path = %path.display(), total, free, "statvfs");
    Ok(DiskSpace { total, used, free })
}

/// Picks the mount point that is the longest prefix of `path`.
#[cfg(not(unix))]
fn best_mount<'a, I>(path: &Path, mounts: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Path>,
{
    mounts
        .into_iter()
        .enumerate()
        .filter(|(_, mount)| path.starts_with(mount))
        .max_by_key(|(_, mount)| mount.components().count())
        .map(|(i, _)| i)
}

/// Space on the volume that holds `path`.
///
/// # Errors
///
/// Returns an error if `path` does not exist or no mounted volume
/// contains it.
#[cfg(not(unix))]
pub fn disk_space(path: &Path) -> Result<DiskSpace> {
    let absolute = path
        .canonicalize()
        .wrap_err_with(|| format!("Path does not exist: {}", path.display()))?;
    let disks = sysinfo::Disks::new_with_refreshed_list();
    let list = disks.list();
    let index = best_mount(&absolute, list.iter().map(sysinfo::Disk::mount_point))
        .ok_or_else(|| color_eyre::eyre::eyre!("No mounted volume contains {}", absolute.display()))?;
    let disk = &list[index];
    tracing::debug!(mount = %disk.mount_point().display(), "selected volume");

    let total = disk.total_space();
    let free = disk.available_space();
    Ok(DiskSpace {
        total,
        used: total.saturating_sub(free),
        free,
    })
}

/// Prints total, used and free space for the filesystem holding `path`.
///
/// # Errors
///
/// Returns an error if `path` does not exist.
pub fn disk_usage(out: &mut dyn Write, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Path does not exist: {}", path.display());
    }
    let space = disk_space(path)?;
    let rows = vec![
        vec!["Total".to_string(), output::gigabytes(space.total)],
        vec!["Used".to_string(), output::gigabytes(space.used)],
        vec!["Free".to_string(), output::gigabytes(space.free)],
    ];
    write!(out, "{}", output::render_table(&["Metric", "Value"], &rows))?;
    Ok(())
}

/// Prints every visible process as `PID | Name | Status`, sorted by PID.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn processes(out: &mut dyn Write) -> Result<()> {
    let sys = System::new_all();
    let mut rows: Vec<(u32, Vec<String>)> = sys
        .processes()
        .iter()
        .map(|(pid, process)| {
            (
                pid.as_u32(),
                vec![
                    pid.as_u32().to_string(),
                    process.name().to_string(),
                    process.status().to_string(),
                ],
            )
        })
        .collect();
    rows.sort_by_key(|(pid, _)| *pid);
    let rows: Vec<Vec<String>> = rows.into_iter().map(|(_, row)| row).collect();
    write!(out, "{}", output::render_table(&["PID", "Name", "Status"], &rows))?;
    Ok(())
}

/// Conventional kernel family name for the compile target.
fn system_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        other => other,
    }
}

fn privileges_label(root: bool) -> &'static str {
    if root {
        "root"
    } else {
        "user"
    }
}

fn or_na(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `Property | Value` rows describing this host.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn host_rows() -> Vec<Vec<String>> {
    let sys = System::new_all();
    let processor = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string());
    let cores = sys.physical_core_count().map(|n| n.to_string());
    let threads = Some(sys.cpus().len()).filter(|n| *n > 0).map(|n| n.to_string());
    let total_ram = format!("{:.2}", sys.total_memory() as f64 / 1_000_000_000.0);

    vec![
        vec!["System".to_string(), system_name().to_string()],
        vec!["Node".to_string(), or_na(System::host_name())],
        vec!["Release".to_string(), or_na(System::kernel_version())],
        vec!["Version".to_string(), or_na(System::long_os_version())],
        vec!["Machine".to_string(), or_na(System::cpu_arch())],
        vec!["Processor".to_string(), or_na(processor)],
        vec!["CPU cores".to_string(), or_na(cores)],
        vec!["Threads".to_string(), or_na(threads)],
        vec!["Total RAM (GB)".to_string(), total_ram],
        vec!["Privileges".to_string(), privileges_label(utils::is_root()).to_string()],
    ]
}

/// Prints a table of host properties.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn sys_info(out: &mut dyn Write) -> Result<()> {
    write!(out, "{}", output::render_table(&["Property", "Value"], &host_rows()))?;
    Ok(())
}
