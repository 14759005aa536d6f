//! Diagnostic logging to stderr.

use std::str::FromStr;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Maps `-v`/`-q` counts to a level: warn by default, error when quiet,
/// then info, debug and trace for each extra `-v`.
#[must_use]
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber.
///
/// Filtering uses the conventional `RUST_LOG` environment variable when set;
/// otherwise the level derived from the verbosity flags applies to this crate
/// only.
///
/// # Errors
///
/// Returns an error if `RUST_LOG` is not a valid filter or a subscriber is
/// already installed.
pub fn setup_tracing(verbose: u8, quiet: bool) -> Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(rust_log) => EnvFilter::from_str(&rust_log)
            .wrap_err("RUST_LOG should contain a valid filter configuration")?,
        Err(_) => EnvFilter::default()
            .add_directive(LevelFilter::WARN.into())
            .add_directive(
                format!("{}={}", env!("CARGO_CRATE_NAME"), level_for(verbose, quiet))
                    .parse()
                    .wrap_err("Invalid log directive")?,
            ),
    };

    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre!("Failed to install logger: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0, false), LevelFilter::WARN);
        assert_eq!(level_for(1, false), LevelFilter::INFO);
        assert_eq!(level_for(2, false), LevelFilter::DEBUG);
        assert_eq!(level_for(7, false), LevelFilter::TRACE);
    }

    #[test]
    fn test_quiet_wins() {
        assert_eq!(level_for(3, true), LevelFilter::ERROR);
    }
}
