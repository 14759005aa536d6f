//! Live CPU and memory sampling.
//!
//! A background sampler thread refreshes system counters every interval and
//! sends each reading over an MPSC channel. The thread stops on its own once
//! the receiver is dropped.

use std::io::Write;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use sysinfo::System;

/// One CPU/memory reading, both as percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub cpu: f32,
    pub memory: f64,
}

impl Sample {
    /// The line printed by `monitor`.
    #[must_use]
    pub fn line(&self) -> String {
        format!("CPU: {:5.1}% | Memory: {:5.1}%", self.cpu, self.memory)
    }
}

#[allow(clippy::cast_precision_loss)]
fn memory_percent(sys: &System) -> f64 {
    let total = sys.total_memory();
    if total == 0 {
        return 0.0;
    }
    sys.used_memory() as f64 / total as f64 * 100.0
}

/// Spawns the sampler thread.
///
/// Intervals shorter than the minimum CPU refresh interval are raised to it,
/// since CPU usage is meaningless below that.
#[must_use]
pub fn spawn_sampler(interval: Duration) -> Receiver<Sample> {
    let interval = interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut sys = System::new();
        sys.refresh_cpu();
        loop {
            thread::sleep(interval);
            sys.refresh_cpu();
            sys.refresh_memory();
            let sample = Sample {
                cpu: sys.global_cpu_info().cpu_usage(),
                memory: memory_percent(&sys),
            };
            if tx.send(sample).is_err() {
                return;
            }
        }
    });

    rx
}

/// Prints a sample every `interval_secs` until `duration_secs` elapses, or
/// forever when no duration is given. At least one sample is printed.
///
/// # Errors
///
/// Returns an error for a non-positive interval or if the sampler stops.
pub fn monitor(out: &mut dyn Write, interval_secs: f64, duration_secs: Option<f64>) -> Result<()> {
    if !(interval_secs.is_finite() && interval_secs > 0.0) {
        bail!("Interval must be positive.");
    }
    let interval = Duration::try_from_secs_f64(interval_secs).wrap_err("Interval is too large")?;
    let limit = match duration_secs {
        Some(d) if !(d.is_finite() && d >= 0.0) => bail!("Duration must not be negative."),
        Some(d) => Some(Duration::try_from_secs_f64(d).wrap_err("Duration is too large")?),
        None => None,
    };

    let samples = spawn_sampler(interval);
    let start = Instant::now();
    loop {
        let sample = samples.recv()?;
        writeln!(out, "{}", sample.line())?;
        out.flush()?;
        if limit.is_some_and(|limit| start.elapsed() >= limit) {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_line_format() {
        let sample = Sample {
            cpu: 12.34,
            memory: 56.78,
        };
        assert_eq!(sample.line(), "CPU:  12.3% | Memory:  56.8%");
    }

    #[test]
    fn test_sampler_delivers_readings() {
        let rx = spawn_sampler(Duration::from_millis(10));
        let sample = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!((0.0..=100.0).contains(&sample.memory));
        assert!(sample.cpu >= 0.0);
    }

    #[test]
    fn test_monitor_stops_after_duration() {
        let mut out = Vec::new();
        monitor(&mut out, 0.05, Some(0.3)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().count() >= 1);
        assert!(text.lines().all(|l| l.starts_with("CPU: ")));
    }

    #[test]
    fn test_monitor_rejects_bad_interval() {
        let mut out = Vec::new();
        assert!(monitor(&mut out, 0.0, Some(1.0)).is_err());
        assert!(monitor(&mut out, 1.0, Some(-1.0)).is_err());
    }

    #[test]
    fn test_monitor_rejects_huge_values() {
        let mut out = Vec::new();
        let err = monitor(&mut out, 1e20, Some(1.0)).unwrap_err();
        assert!(err.to_string().contains("too large"));
        let err = monitor(&mut out, 1.0, Some(1e20)).unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_monitor_zero_duration_prints_one_sample() {
        let mut out = Vec::new();
        monitor(&mut out, 0.05, Some(0.0)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("CPU: "));
    }
}
