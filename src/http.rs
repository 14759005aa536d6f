//! Blocking HTTP helpers shared by the web-backed tools.

use std::io::Read;
use std::time::{Duration, Instant};

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::constants;

/// Builds a client with the given timeout and the `aio/<version>` user agent.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(format!("{}/{}", constants::APP_NAME, constants::APP_VERSION))
        .build()
        .wrap_err(constants::ERR_HTTP_CLIENT_BUILD_FAILED)
}

/// Sends a GET request without checking the status code.
///
/// # Errors
///
/// Returns an error on connection failure or timeout.
pub fn get(client: &Client, url: &str) -> Result<Response> {
    tracing::debug!(url, "GET");
    client
        .get(url)
        .send()
        .wrap_err(constants::ERR_NETWORK_REQUEST_FAILED)
}

/// Sends a GET request and fails on any non-success status.
///
/// # Errors
///
/// Returns an error on connection failure, timeout, or a non-2xx status.
pub fn get_ok(client: &Client, url: &str) -> Result<Response> {
    let response = get(client, url)?;
    if !response.status().is_success() {
        bail!("{}{}", constants::ERR_SERVER_ERROR, response.status());
    }
    Ok(response)
}

/// GETs `url` and deserializes the JSON body.
///
/// # Errors
///
/// Returns an error on request failure, non-2xx status, or a body that does
/// not match `T`.
pub fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    let response = get_ok(client, url)?;
    let body = response
        .text()
        .wrap_err(constants::ERR_READ_CONTENT_FAILED)?;
    serde_json::from_str(&body).wrap_err_with(|| format!("Unexpected response from {url}"))
}

/// Result of streaming a response body to nowhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    pub bytes: u64,
    pub elapsed: Duration,
}

impl Transfer {
    /// Average throughput in megabits per second.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn megabits_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        (self.bytes as f64 * 8.0 / 1_000_000.0) / secs
    }

    /// Size in decimal megabytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn megabytes(&self) -> f64 {
        self.bytes as f64 / 1_000_000.0
    }
}

/// Downloads `url`, discarding the body, and measures the transfer.
///
/// # Errors
///
/// Returns an error on request failure, non-2xx status, or a broken stream.
pub fn measure_download(client: &Client, url: &str) -> Result<Transfer> {
    let start = Instant::now();
    let mut response = get_ok(client, url)?;
    let mut buf = vec![0u8; constants::IO_CHUNK_SIZE];
    let mut bytes = 0u64;
    loop {
        let n = response
            .read(&mut buf)
            .wrap_err(constants::ERR_READ_CONTENT_FAILED)?;
        if n == 0 {
            break;
        }
        bytes += n as u64;
    }
    Ok(Transfer {
        bytes,
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! A one-shot HTTP server for exercising the web tools offline.

    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serves a single request with `status`, `content_type` and `body`.
    ///
    /// Returns the base URL and a handle yielding the request line.
    pub fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: String,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nX-Test: yes\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request_line.trim().to_string()
        });
        (format!("http://{addr}"), handle)
    }
}
