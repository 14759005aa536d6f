//! TCP connect port scanner.

use std::io::Write;
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::ops::RangeInclusive;
use std::thread;
use std::time::Duration;

use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;

use crate::{constants, output};

/// Parameters for a single scan.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub host: String,
    pub start_port: u16,
    pub end_port: u16,
    pub timeout_secs: f64,
    pub workers: usize,
}

impl ScanRequest {
    fn validate(&self) -> Result<(RangeInclusive<u16>, Duration)> {
        if self.start_port == 0 {
            bail!("Port range must start at 1 or above");
        }
        if self.start_port > self.end_port {
            bail!(
                "Start port {} is greater than end port {}",
                self.start_port,
                self.end_port
            );
        }
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            bail!("Timeout must be a positive number of seconds");
        }
        if self.workers == 0 {
            bail!("At least one worker is required");
        }
        let timeout = Duration::try_from_secs_f64(self.timeout_secs)
            .wrap_err("Timeout is too large")?;
        Ok((self.start_port..=self.end_port, timeout))
    }
}

/// Resolves a host name to an address, preferring IPv4.
///
/// # Errors
///
/// Returns an error if the name does not resolve.
pub fn resolve_host(host: &str) -> Result<IpAddr> {
    let addrs: Vec<SocketAddr> = (host, 0)
        .to_socket_addrs()
        .wrap_err_with(|| format!("Failed to resolve host: {host}"))?
        .collect();
    addrs
        .iter()
        .find(|a| a.is_ipv4())
        .or_else(|| addrs.first())
        .map(SocketAddr::ip)
        .ok_or_else(|| eyre!("Failed to resolve host: {host}"))
}

fn is_open(ip: IpAddr, port: u16, timeout: Duration) -> bool {
    TcpStream::connect_timeout(&SocketAddr::new(ip, port), timeout).is_ok()
}

/// Returns the open ports in `ports`, ascending.
///
/// The range is split into contiguous chunks, one per worker thread.
#[must_use]
pub fn scan_ports(ip: IpAddr, ports: RangeInclusive<u16>, timeout: Duration, workers: usize) -> Vec<u16> {
    let all: Vec<u16> = ports.collect();
    let chunk_size = all.len().div_ceil(workers.max(1)).max(1);

    let mut open: Vec<u16> = thread::scope(|scope| {
        let handles: Vec<_> = all
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .copied()
                        .filter(|port| is_open(ip, *port, timeout))
                        .collect::<Vec<u16>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_default())
            .collect()
    });
    open.sort_unstable();
    open
}

/// Scans the requested range and prints the open ports.
///
/// # Errors
///
/// Returns an error for an invalid request or an unresolvable host.
pub fn run(out: &mut dyn Write, request: &ScanRequest) -> Result<()> {
    let (ports, timeout) = request.validate()?;
    writeln!(
        out,
        "Scanning {} ports {}-{} with timeout {}s...",
        request.host, request.start_port, request.end_port, request.timeout_secs
    )?;
    let ip = resolve_host(&request.host)?;
    tracing::debug!(%ip, workers = request.workers, "scanning");

    let open = scan_ports(ip, ports, timeout, request.workers);
    if open.is_empty() {
        output::notice(out, constants::MSG_NO_OPEN_PORTS)?;
    } else {
        output::success(out, "Open ports:")?;
        let list: Vec<String> = open.iter().map(ToString::to_string).collect();
        writeln!(out, "{}", list.join(", "))?;
    }
    Ok(())
}
