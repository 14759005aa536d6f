use std::io::{self, Write};

use clap::Parser;
use color_eyre::config::{HookBuilder, Theme};
use color_eyre::Result;
use crossterm::tty::IsTty;

use aio::cli::args::Args;
use aio::cli::commands;
use aio::config::Config;
use aio::{logging, output};

fn main() -> Result<()> {
    let args = Args::parse();

    let color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
    if color {
        color_eyre::install()?;
    } else {
        HookBuilder::default().theme(Theme::new()).install()?;
    }
    output::set_color(color && io::stdout().is_tty());
    logging::setup_tracing(args.verbose, args.quiet)?;

    let config = Config::load(args.config_dir.as_deref())?;
    tracing::info!(
        dir = %config.config_dir.display(),
        source = %config.source,
        file_loaded = config.file_loaded,
        "configuration loaded"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(args.command, &config, &mut out)?;
    out.flush()?;
    Ok(())
}
