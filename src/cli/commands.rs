//! Dispatch from the parsed argument tree to the tools.

use std::io::Write;

use color_eyre::eyre::bail;
use color_eyre::Result;
use reqwest::blocking::Client;

use crate::cli::args::{
    ClipboardAction, Commands, FunCommand, NetworkCommand, NotesAction, RandomMode,
    SecurityCommand, SystemCommand, TodoAction, UtilityCommand,
};
use crate::config::Config;
use crate::tools::network::{lookup, probe, scan, web};
use crate::tools::security::{archive, codec, files, password};
use crate::tools::system::{self, clipboard, info, monitor};
use crate::tools::utility::{self, clock, convert, organizer, random};
use crate::tools::fun;
use crate::{constants, event, http};

/// Runs the selected tool, writing its result to `out`.
///
/// # Errors
///
/// Returns whatever error the tool reports.
pub fn dispatch(command: Commands, config: &Config, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Network(cmd) => run_network(cmd, config, out),
        Commands::Security(cmd) => run_security(cmd, config, out),
        Commands::System(cmd) => run_system(cmd, out),
        Commands::Utility(cmd) => run_utility(cmd, config, out),
        Commands::Fun(cmd) => run_fun(cmd, config, out),
    }
}

fn client(config: &Config) -> Result<Client> {
    http::client(config.settings.http_timeout_secs)
}

fn run_network(cmd: NetworkCommand, config: &Config, out: &mut dyn Write) -> Result<()> {
    let endpoints = &config.settings.endpoints;
    match cmd {
        NetworkCommand::PortScan {
            host,
            start_port,
            end_port,
            timeout,
            workers,
        } => {
            let defaults = &config.settings.port_scan;
            let request = scan::ScanRequest {
                host,
                start_port,
                end_port,
                timeout_secs: timeout.unwrap_or(defaults.timeout_secs),
                workers: workers.unwrap_or(defaults.workers),
            };
            scan::run(out, &request)
        }
        NetworkCommand::Ping { host, count } => probe::ping(out, &host, count),
        NetworkCommand::DnsLookup { domain } => lookup::dns_lookup(out, &domain),
        NetworkCommand::Whois { domain } => lookup::whois(out, &domain, &endpoints.whois),
        NetworkCommand::Traceroute { host, max_hops } => probe::traceroute(out, &host, max_hops),
        NetworkCommand::IpGeo { ip } => web::ip_geo(out, &client(config)?, &endpoints.ipinfo, &ip),
        NetworkCommand::HttpHeaders { url } => web::http_headers(out, &client(config)?, &url),
        NetworkCommand::Subdomains { domain, wordlist } => {
            lookup::subdomains(out, &domain, wordlist.as_deref())
        }
        NetworkCommand::SpeedTest { url } => {
            let timeout = config
                .settings
                .http_timeout_secs
                .max(constants::SPEED_TEST_TIMEOUT_SECS);
            let url = url.unwrap_or_else(|| endpoints.speed_test.clone());
            web::speed_test(out, &http::client(timeout)?, &url)
        }
        NetworkCommand::MacVendor { mac } => {
            web::mac_vendor(out, &client(config)?, &endpoints.mac_vendors, &mac)
        }
    }
}

/// Prompts twice for a new password and checks the answers agree.
fn prompt_new_password() -> Result<String> {
    let first = event::prompt_hidden("Password")?;
    let second = event::prompt_hidden("Repeat for confirmation")?;
    if first != second {
        bail!("Passwords do not match.");
    }
    Ok(first)
}

fn run_security(cmd: SecurityCommand, config: &Config, out: &mut dyn Write) -> Result<()> {
    match cmd {
        SecurityCommand::GeneratePassword {
            length,
            no_upper,
            no_digits,
            no_symbols,
        } => {
            let policy = password::PasswordPolicy {
                length,
                upper: !no_upper,
                digits: !no_digits,
                symbols: !no_symbols,
            };
            password::generate_password(out, &policy)
        }
        SecurityCommand::Hash {
            text,
            file,
            algorithm,
        } => {
            let algorithm = algorithm.unwrap_or_else(|| config.settings.default_hash_algorithm.clone());
            codec::hash(out, text.as_deref(), file.as_deref(), &algorithm)
        }
        SecurityCommand::CheckPassword { password: given } => {
            let secret = match given {
                Some(secret) => secret,
                None => event::prompt_hidden("Password")?,
            };
            password::check_password(out, &secret)
        }
        SecurityCommand::Base64Encode { data } => {
            writeln!(out, "{}", codec::base64_encode(&data))?;
            Ok(())
        }
        SecurityCommand::Base64Decode { data } => {
            writeln!(out, "{}", codec::base64_decode(&data)?)?;
            Ok(())
        }
        SecurityCommand::CaesarCipher { text, shift } => {
            writeln!(out, "{}", codec::caesar(&text, shift))?;
            Ok(())
        }
        SecurityCommand::ListHidden { path } => files::list_hidden(out, &path),
        SecurityCommand::SecureDelete { file } => files::secure_delete(out, &file),
        SecurityCommand::ZipEncrypt {
            source,
            output,
            password: given,
        } => {
            let secret = match given {
                Some(secret) => secret,
                None => prompt_new_password()?,
            };
            archive::zip_encrypt(out, &source, &output, &secret)
        }
        SecurityCommand::Backup {
            source,
            destination,
        } => archive::backup(out, &source, &destination),
    }
}

fn run_system(cmd: SystemCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        SystemCommand::DiskUsage { path } => info::disk_usage(out, &path),
        SystemCommand::Processes => info::processes(out),
        SystemCommand::SysInfo => info::sys_info(out),
        SystemCommand::FindFile { pattern, root } => system::files::find_file(out, &pattern, &root),
        SystemCommand::Compress { source, output } => system::files::compress(out, &source, &output),
        SystemCommand::Grep { pattern, file } => system::files::grep(out, &pattern, &file),
        SystemCommand::Monitor { interval, duration } => monitor::monitor(out, interval, duration),
        SystemCommand::Clipboard { action } => match action {
            ClipboardAction::Copy { text: Some(text) } => clipboard::copy(out, &text),
            ClipboardAction::Copy { text: None } => bail!("Provide the text to copy with --text."),
            ClipboardAction::Paste => clipboard::paste(out),
        },
    }
}

fn run_utility(cmd: UtilityCommand, config: &Config, out: &mut dyn Write) -> Result<()> {
    let endpoints = &config.settings.endpoints;
    match cmd {
        UtilityCommand::Weather { city } => {
            utility::web::weather(out, &client(config)?, &endpoints.wttr, &city)
        }
        UtilityCommand::CurrencyConvert { amount, from, to } => utility::web::currency_convert(
            out,
            &client(config)?,
            &endpoints.exchange_rate,
            amount,
            &from,
            &to,
        ),
        UtilityCommand::UnitConvert { value, from, to } => convert::unit_convert(out, value, &from, &to),
        UtilityCommand::Todo { action } => {
            let path = config.todo_path();
            match action {
                TodoAction::Add { text } => organizer::todo_add(out, &path, &text),
                TodoAction::List => organizer::todo_list(out, &path),
                TodoAction::Remove { number } => organizer::todo_remove(out, &path, number),
            }
        }
        UtilityCommand::Timer { seconds } => clock::timer(out, seconds),
        UtilityCommand::Stopwatch => clock::stopwatch(out),
        UtilityCommand::Notes { action } => {
            let path = config.notes_path();
            match action {
                NotesAction::Add { text } => organizer::notes_add(out, &path, &text),
                NotesAction::Show => organizer::notes_show(out, &path),
            }
        }
        UtilityCommand::Random { mode } => match mode {
            RandomMode::Number { max, min } => random::random_number(out, max, min),
            RandomMode::String { length } => random::random_string(out, length),
            RandomMode::Choice { items } => random::random_choice(out, &items),
        },
    }
}

fn run_fun(cmd: FunCommand, config: &Config, out: &mut dyn Write) -> Result<()> {
    let endpoints = &config.settings.endpoints;
    match cmd {
        FunCommand::AsciiArt { text } => fun::ascii_art(out, &text),
        FunCommand::Joke => fun::joke(out, &client(config)?, &endpoints.joke),
        FunCommand::Fortune => fun::fortune(out),
        FunCommand::Quote => fun::quote(out, &client(config)?, &endpoints.quote),
    }
}
