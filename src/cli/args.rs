//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::constants;

/// aio - all-in-one command-line toolbox
#[derive(Parser, Debug)]
#[command(name = "aio", author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding config.toml, todo.json and notes.txt
    #[arg(long, global = true, env = "AIO_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Disable colored output (also honored via NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Tool category to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Tool categories
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Network utilities
    #[command(subcommand)]
    Network(NetworkCommand),
    /// Security and privacy tools
    #[command(subcommand)]
    Security(SecurityCommand),
    /// System information and file tools
    #[command(subcommand)]
    System(SystemCommand),
    /// Everyday utilities
    #[command(subcommand)]
    Utility(UtilityCommand),
    /// Just for fun
    #[command(subcommand)]
    Fun(FunCommand),
}

#[derive(Subcommand, Debug)]
pub enum NetworkCommand {
    /// Scan a range of TCP ports on a host
    PortScan {
        /// Host name or IP address
        host: String,
        /// First port to scan
        #[arg(long, default_value_t = 1)]
        start_port: u16,
        /// Last port to scan (inclusive)
        #[arg(long, default_value_t = 1024)]
        end_port: u16,
        /// Per-port connect timeout in seconds [default: 0.5]
        #[arg(long)]
        timeout: Option<f64>,
        /// Number of parallel scanning threads [default: 1]
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Ping a host using the system ping command
    Ping {
        host: String,
        /// Number of echo requests
        #[arg(short, long, default_value_t = 4)]
        count: u32,
    },
    /// Resolve a domain to its IPv4 and IPv6 addresses
    DnsLookup { domain: String },
    /// WHOIS lookup for a domain
    Whois { domain: String },
    /// Trace the network route to a host
    Traceroute {
        host: String,
        /// Maximum number of hops
        #[arg(long, default_value_t = 30)]
        max_hops: u32,
    },
    /// Approximate geolocation of an IP address
    IpGeo { ip: String },
    /// Show the response headers of a URL
    HttpHeaders { url: String },
    /// Find subdomains that resolve, from a wordlist
    Subdomains {
        domain: String,
        /// File with one candidate name per line
        #[arg(long)]
        wordlist: Option<PathBuf>,
    },
    /// Measure download speed
    SpeedTest {
        /// File to download [default: configured speed test URL]
        #[arg(long)]
        url: Option<String>,
    },
    /// Look up the vendor of a MAC address
    MacVendor { mac: String },
}

#[derive(Subcommand, Debug)]
pub enum SecurityCommand {
    /// Generate a random password
    GeneratePassword {
        /// Password length
        #[arg(short, long, default_value_t = constants::DEFAULT_PASSWORD_LENGTH)]
        length: usize,
        /// Leave out uppercase letters
        #[arg(long)]
        no_upper: bool,
        /// Leave out digits
        #[arg(long)]
        no_digits: bool,
        /// Leave out punctuation
        #[arg(long)]
        no_symbols: bool,
    },
    /// Hash text or a file with md5, sha1 or sha256
    Hash {
        /// Text to hash
        #[arg(long)]
        text: Option<String>,
        /// File to hash (takes precedence over --text)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Hash algorithm [default: sha256]
        #[arg(long)]
        algorithm: Option<String>,
    },
    /// Score a password's strength
    CheckPassword {
        /// Password to check (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Encode text as base64
    Base64Encode { data: String },
    /// Decode base64 text
    Base64Decode { data: String },
    /// Shift letters with a Caesar cipher (negative shift decrypts)
    CaesarCipher {
        text: String,
        #[arg(allow_negative_numbers = true)]
        shift: i64,
    },
    /// List hidden files in a directory
    ListHidden {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Overwrite a file with random data, then delete it
    SecureDelete { file: PathBuf },
    /// Create a password-protected zip archive
    ZipEncrypt {
        /// File or directory to archive
        source: PathBuf,
        /// Zip file to create
        output: PathBuf,
        /// Archive password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Back up a directory into a tar.gz archive
    Backup {
        source: PathBuf,
        destination: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum SystemCommand {
    /// Show disk usage of the filesystem holding a path
    DiskUsage {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// List running processes
    Processes,
    /// Show host and hardware information
    SysInfo,
    /// Find files whose name matches a regex
    FindFile {
        pattern: String,
        /// Directory to search
        #[arg(default_value = ".")]
        root: PathBuf,
    },
    /// Compress a file or directory into a tar.gz archive
    Compress { source: PathBuf, output: PathBuf },
    /// Print lines of a file matching a regex
    Grep { pattern: String, file: PathBuf },
    /// Print CPU and memory usage periodically
    Monitor {
        /// Seconds between samples
        #[arg(long, default_value_t = 1.0)]
        interval: f64,
        /// Stop after this many seconds (runs until interrupted otherwise)
        #[arg(long)]
        duration: Option<f64>,
    },
    /// Copy to or paste from the system clipboard
    Clipboard {
        #[command(subcommand)]
        action: ClipboardAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClipboardAction {
    /// Copy text to the clipboard
    Copy {
        #[arg(long)]
        text: Option<String>,
    },
    /// Print the clipboard contents
    Paste,
}

#[derive(Subcommand, Debug)]
pub enum UtilityCommand {
    /// Current weather for a city
    Weather { city: String },
    /// Convert between currencies
    CurrencyConvert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        from: String,
        to: String,
    },
    /// Convert between units (m/ft, kg/lb, C/F)
    UnitConvert {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// Manage a simple to-do list
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },
    /// Count down a number of seconds
    Timer {
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },
    /// Measure time until Enter is pressed
    Stopwatch,
    /// Keep timestamped notes
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },
    /// Random numbers, strings and choices
    Random {
        #[command(subcommand)]
        mode: RandomMode,
    },
}

#[derive(Subcommand, Debug)]
pub enum TodoAction {
    /// Add a task
    Add { text: String },
    /// List tasks
    List,
    /// Remove a task by its number
    Remove { number: usize },
}

#[derive(Subcommand, Debug)]
pub enum NotesAction {
    /// Append a note
    Add { text: String },
    /// Print all notes
    Show,
}

#[derive(Subcommand, Debug)]
pub enum RandomMode {
    /// Random number between MIN and MAX
    Number {
        #[arg(allow_negative_numbers = true)]
        max: f64,
        #[arg(allow_negative_numbers = true, default_value_t = 0.0)]
        min: f64,
    },
    /// Random alphanumeric string
    String { length: usize },
    /// Random item from a comma-separated list
    Choice { items: String },
}

#[derive(Subcommand, Debug)]
pub enum FunCommand {
    /// Render text as an ASCII art banner
    AsciiArt { text: String },
    /// Tell a random joke
    Joke,
    /// Show a random fortune
    Fortune,
    /// Fetch an inspirational quote
    Quote,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_tree_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_port_scan_defaults() {
        let args = Args::parse_from(["aio", "network", "port-scan", "localhost"]);
        match args.command {
            Commands::Network(NetworkCommand::PortScan {
                host,
                start_port,
                end_port,
                timeout,
                workers,
            }) => {
                assert_eq!(host, "localhost");
                assert_eq!((start_port, end_port), (1, 1024));
                assert_eq!(timeout, None);
                assert_eq!(workers, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_negative_caesar_shift() {
        let args = Args::parse_from(["aio", "security", "caesar-cipher", "Khoor", "-3"]);
        assert!(matches!(
            args.command,
            Commands::Security(SecurityCommand::CaesarCipher { shift: -3, .. })
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from(["aio", "fun", "fortune", "-vv", "--no-color"]);
        assert_eq!(args.verbose, 2);
        assert!(args.no_color);
    }

    #[test]
    fn test_random_number_min_defaults_to_zero() {
        let args = Args::parse_from(["aio", "utility", "random", "number", "10"]);
        match args.command {
            Commands::Utility(UtilityCommand::Random {
                mode: RandomMode::Number { max, min },
            }) => {
                assert!((max - 10.0).abs() < f64::EPSILON);
                assert!(min.abs() < f64::EPSILON);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["aio", "-q", "-v", "fun", "joke"]).is_err());
    }
}
