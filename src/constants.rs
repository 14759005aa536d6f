//! Application-wide constants and default configuration values.
//!
//! This module defines all static configuration values used throughout aio,
//! including timing intervals, API endpoints, file names, and user messages.

use std::time::Duration;

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Path Configuration ===

/// Name of the configuration directory under the platform config root.
pub const CONFIG_DIR_NAME: &str = "aio";
/// Fallback directory under `$HOME` when no platform config root exists.
pub const FALLBACK_DIR_NAME: &str = ".aio";
/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Name of the to-do list file.
pub const TODO_FILE_NAME: &str = "todo.json";
/// Name of the notes file.
pub const NOTES_FILE_NAME: &str = "notes.txt";

// === API Endpoints ===

/// IP geolocation service (`/<ip>/json` is appended).
pub const IPINFO_API: &str = "https://ipinfo.io";
/// MAC vendor lookup service (`/<mac>` is appended).
pub const MAC_VENDORS_API: &str = "https://api.macvendors.com";
/// Weather service (`/<city>?format=j1` is appended).
pub const WTTR_API: &str = "https://wttr.in";
/// Currency conversion service (`/convert` is appended).
pub const EXCHANGE_RATE_API: &str = "https://api.exchangerate.host";
/// Random joke endpoint.
pub const JOKE_API: &str = "https://official-joke-api.appspot.com/jokes/random";
/// Random quote endpoint.
pub const QUOTE_API: &str = "https://api.quotable.io/random";
/// File downloaded by `speed-test`.
pub const SPEED_TEST_URL: &str = "http://speedtest.tele2.net/1MB.zip";
/// Root WHOIS server consulted before following referrals.
pub const WHOIS_ROOT_SERVER: &str = "whois.iana.org";
/// WHOIS TCP port.
pub const WHOIS_PORT: u16 = 43;

// === Timeouts ===

/// Timeout for HTTP API calls in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;
/// Timeout for the speed test download in seconds.
pub const SPEED_TEST_TIMEOUT_SECS: u64 = 30;
/// Timeout for WHOIS connections.
pub const WHOIS_TIMEOUT: Duration = Duration::from_secs(10);
/// Default per-port connect timeout for `port-scan` in seconds.
pub const PORT_SCAN_TIMEOUT_SECS: f64 = 0.5;
/// Default number of `port-scan` workers.
pub const PORT_SCAN_WORKERS: usize = 1;

// === Timing Configuration ===

/// Redraw interval for `timer` and `stopwatch`.
pub const COUNTDOWN_TICK_MS: u64 = 100;
/// Buffer size for streamed reads (hashing, downloads, shredding).
pub const IO_CHUNK_SIZE: usize = 8192;

// === Tool Defaults ===

/// Words tried by `subdomains` when no wordlist is given.
pub const DEFAULT_SUBDOMAINS: [&str; 6] = ["www", "mail", "ftp", "blog", "dev", "api"];
/// Default hash algorithm.
pub const DEFAULT_HASH_ALGORITHM: &str = "sha256";
/// Default generated password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Built-in fortunes for `fun fortune`.
pub const FORTUNES: [&str; 5] = [
    "Your future is as bright as you make it.",
    "Now is the time to try something new.",
    "Happiness begins with facing life with a smile and a wink.",
    "Believe it can be done.",
    "If you have to choose between two evils, pick the one you've never tried before.",
];

// === Messages: Soft outcomes ===

pub const MSG_NO_OPEN_PORTS: &str = "No open ports found in the specified range.";
pub const MSG_NO_DNS_RECORDS: &str = "No DNS records found.";
pub const MSG_NO_SUBDOMAINS: &str = "No subdomains resolved from the provided wordlist.";
pub const MSG_NO_HIDDEN_FILES: &str = "No hidden files found.";
pub const MSG_NO_FILES_MATCHED: &str = "No files matched.";
pub const MSG_NO_TASKS: &str = "No tasks.";
pub const MSG_NO_NOTES: &str = "No notes found.";
pub const MSG_PING_FAILED: &str = "Ping failed or host unreachable.";
pub const MSG_TRACEROUTE_FAILED: &str = "Traceroute command returned an error.";

// === Messages: Success ===

pub const MSG_SECURE_DELETED: &str = "File securely deleted.";
pub const MSG_ARCHIVE_CREATED: &str = "Archive created: ";
pub const MSG_BACKUP_CREATED: &str = "Backup created at ";
pub const MSG_TASK_ADDED: &str = "Task added.";
pub const MSG_TASK_REMOVED: &str = "Removed: ";
pub const MSG_NOTE_ADDED: &str = "Note added.";
pub const MSG_CLIPBOARD_COPIED: &str = "Text copied to clipboard.";
pub const MSG_TIMES_UP: &str = "Time's up!";

// === Error Messages ===

pub const ERR_HTTP_CLIENT_BUILD_FAILED: &str = "Failed to build HTTP client";
pub const ERR_NETWORK_REQUEST_FAILED: &str = "Network request failed";
pub const ERR_SERVER_ERROR: &str = "Server returned error: ";
pub const ERR_READ_CONTENT_FAILED: &str = "Failed to read content";
pub const ERR_UNSUPPORTED_UNITS: &str =
    "Unsupported unit conversion. Supported conversions: m<->ft, kg<->lb, C<->F";
pub const ERR_NO_CLIPBOARD: &str =
    "No clipboard utility found (tried pbcopy/pbpaste, xclip, xsel, clip/powershell)";
