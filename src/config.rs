//! User configuration.
//!
//! Values are layered: built-in defaults from [`constants`], then the optional
//! `config.toml` in the config directory, then command-line flags applied by
//! the individual tools.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde::Deserialize;

use crate::constants;

/// Where the config directory came from, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config-dir` flag or `AIO_CONFIG_DIR`.
    Override,
    /// Platform config directory (e.g. `~/.config/aio`).
    Platform,
    /// `~/.aio` fallback.
    Home,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Platform => write!(f, "default"),
            Self::Home => write!(f, "home fallback"),
        }
    }
}

/// Port scanner defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortScanConfig {
    pub timeout_secs: f64,
    pub workers: usize,
}

impl Default for PortScanConfig {
    fn default() -> Self {
        Self {
            timeout_secs: constants::PORT_SCAN_TIMEOUT_SECS,
            workers: constants::PORT_SCAN_WORKERS,
        }
    }
}

/// Base URLs of the third-party services used by the HTTP tools.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Endpoints {
    pub ipinfo: String,
    pub mac_vendors: String,
    pub wttr: String,
    pub exchange_rate: String,
    pub joke: String,
    pub quote: String,
    pub speed_test: String,
    pub whois: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ipinfo: constants::IPINFO_API.to_string(),
            mac_vendors: constants::MAC_VENDORS_API.to_string(),
            wttr: constants::WTTR_API.to_string(),
            exchange_rate: constants::EXCHANGE_RATE_API.to_string(),
            joke: constants::JOKE_API.to_string(),
            quote: constants::QUOTE_API.to_string(),
            speed_test: constants::SPEED_TEST_URL.to_string(),
            whois: constants::WHOIS_ROOT_SERVER.to_string(),
        }
    }
}

/// Contents of `config.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub http_timeout_secs: u64,
    pub data_dir: Option<PathBuf>,
    pub default_hash_algorithm: String,
    pub port_scan: PortScanConfig,
    pub endpoints: Endpoints,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: constants::HTTP_TIMEOUT_SECS,
            data_dir: None,
            default_hash_algorithm: constants::DEFAULT_HASH_ALGORITHM.to_string(),
            port_scan: PortScanConfig::default(),
            endpoints: Endpoints::default(),
        }
    }
}

/// Resolved runtime configuration shared by all tools.
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub source: ConfigSource,
    /// Whether `config.toml` existed and was loaded.
    pub file_loaded: bool,
    pub settings: FileConfig,
}

impl Config {
    /// Resolves the config directory and loads `config.toml` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory can be determined or the
    /// config file exists but cannot be read or parsed.
    pub fn load(dir_override: Option<&Path>) -> Result<Self> {
        let (config_dir, source) = resolve_config_dir(dir_override)?;
        let path = config_dir.join(constants::CONFIG_FILE_NAME);

        let (settings, file_loaded) = if path.is_file() {
            let raw = std::fs::read_to_string(&path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
            (parse_settings(&raw).wrap_err_with(|| format!("Invalid {}", path.display()))?, true)
        } else {
            (FileConfig::default(), false)
        };

        tracing::debug!(dir = %config_dir.display(), %source, file_loaded, "configuration resolved");

        Ok(Self {
            config_dir,
            source,
            file_loaded,
            settings,
        })
    }

    /// Config rooted at `dir` with default settings, without touching the disk.
    #[must_use]
    pub fn with_dir(dir: &Path) -> Self {
        Self {
            config_dir: dir.to_path_buf(),
            source: ConfigSource::Override,
            file_loaded: false,
            settings: FileConfig::default(),
        }
    }

    /// Directory holding the to-do list and notes.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        match &self.settings.data_dir {
            Some(dir) => crate::utils::expand_home(&dir.to_string_lossy()),
            None => self.config_dir.clone(),
        }
    }

    /// Path of the to-do list file.
    #[must_use]
    pub fn todo_path(&self) -> PathBuf {
        self.data_dir().join(constants::TODO_FILE_NAME)
    }

    /// Path of the notes file.
    #[must_use]
    pub fn notes_path(&self) -> PathBuf {
        self.data_dir().join(constants::NOTES_FILE_NAME)
    }
}

fn parse_settings(raw: &str) -> Result<FileConfig> {
    let settings: FileConfig = toml::from_str(raw)?;
    if settings.http_timeout_secs == 0 {
        return Err(eyre!("http_timeout_secs must be greater than zero"));
    }
    if settings.port_scan.workers == 0 {
        return Err(eyre!("port_scan.workers must be at least 1"));
    }
    Ok(settings)
}

fn resolve_config_dir(dir_override: Option<&Path>) -> Result<(PathBuf, ConfigSource)> {
    if let Some(dir) = dir_override {
        return Ok((
            crate::utils::expand_home(&dir.to_string_lossy()),
            ConfigSource::Override,
        ));
    }
    if let Some(root) = dirs::config_dir() {
        return Ok((root.join(constants::CONFIG_DIR_NAME), ConfigSource::Platform));
    }
    crate::utils::home_dir()
        .map(|home| (home.join(constants::FALLBACK_DIR_NAME), ConfigSource::Home))
        .ok_or_else(|| eyre!("Could not determine a configuration directory; pass --config-dir"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path())).unwrap();
        assert!(!config.file_loaded);
        assert_eq!(config.source, ConfigSource::Override);
        assert_eq!(config.settings, FileConfig::default());
        assert_eq!(config.todo_path(), dir.path().join("todo.json"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "http_timeout_secs = 3\n[endpoints]\nwttr = \"http://127.0.0.1:9\"\n",
        )
        .unwrap();

        let config = Config::load(Some(dir.path())).unwrap();
        assert!(config.file_loaded);
        assert_eq!(config.settings.http_timeout_secs, 3);
        assert_eq!(config.settings.endpoints.wttr, "http://127.0.0.1:9");
        assert_eq!(config.settings.endpoints.joke, constants::JOKE_API);
        assert_eq!(config.settings.port_scan, PortScanConfig::default());
    }

    #[test]
    fn test_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::write(
            dir.path().join("config.toml"),
            format!("data_dir = {:?}\n", data.display().to_string()),
        )
        .unwrap();

        let config = Config::load(Some(dir.path())).unwrap();
        assert_eq!(config.notes_path(), data.join("notes.txt"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_settings("colour = true").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(parse_settings("http_timeout_secs = 0").is_err());
        assert!(parse_settings("[port_scan]\nworkers = 0").is_err());
    }
}
