//! tv_grab_fr_telerama - Rust Edition
//! XMLTV grabber for French television listings from Télérama

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use chrono_tz::Europe::Paris;
use clap::Parser;
use log::{error, LevelFilter};

mod api;
mod config;
mod error;
mod feed;
mod grabber;
mod guide;
mod models;
mod wizard;


use api::{ClientConfig, TeleramaClient};
use config::{default_config_path, load_channels, FetchWindow, GrabberConfig};
use error::{GrabError, Result};
use guide::ProgramMapper;

const DESCRIPTION: &str = "France (Télérama)";
const CAPABILITIES: [&str; 2] = ["baseline", "manualconfig"];

/// Get French television listings from Télérama in XMLTV format
#[derive(Parser, Debug)]
#[command(name = "tv_grab_fr_telerama")]
struct Cli {
    /// Print the description for this grabber
    #[arg(long)]
    description: bool,

    /// Show the version of this grabber
    #[arg(long)]
    version: bool,

    /// Show the capabilities this grabber supports
    #[arg(long)]
    capabilities: bool,

    /// Generate the configuration file by asking which channels to grab
    #[arg(long)]
    configure: bool,

    /// Grab DAYS days of TV data (default: 1)
    #[arg(long, value_name = "DAYS")]
    days: Option<u32>,

    /// Grab TV data starting at OFFSET days in the future (default: 0)
    #[arg(long, value_name = "OFFSET")]
    offset: Option<u32>,

    /// Write the XML data to OUTPUT instead of the standard output
    #[arg(long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// File name to write/load the configuration to/from
    /// (default: ~/.xmltv/tv_grab_fr_telerama.conf)
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Only report errors
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report progress and debugging information on stderr
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    fn grabber_config(&self) -> GrabberConfig {
        GrabberConfig {
            config_file: self.config_file.clone().unwrap_or_else(default_config_path),
            window: FetchWindow::new(self.days, self.offset),
            output: self.output.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr; RUST_LOG overrides the flags
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if cli.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }
    if cli.description {
        println!("{}", DESCRIPTION);
        return ExitCode::SUCCESS;
    }
    if cli.capabilities {
        for capability in CAPABILITIES {
            println!("{}", capability);
        }
        return ExitCode::SUCCESS;
    }

    let config = cli.grabber_config();
    let result = if cli.configure { run_configure(&config) } else { run_grab(&config) };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(GrabError::ConfigMissing(path)) => {
            error!("No configuration at {}", path.display());
            println!("You need to configure the grabber by running it with --configure");
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn run_configure(config: &GrabberConfig) -> Result<()> {
    let client = TeleramaClient::new(&ClientConfig::default());
    let stdin = io::stdin();
    grabber::configure(&client, &config.config_file, stdin.lock(), io::stdout())?;
    Ok(())
}

fn run_grab(config: &GrabberConfig) -> Result<()> {
    let channels = load_channels(&config.config_file)?;
    let today = Utc::now().with_timezone(&Paris).date_naive();
    let dates = config.window.dates(today);

    let client = TeleramaClient::new(&ClientConfig::default());
    let doc = grabber::grab(&client, &ProgramMapper::new(Paris), &channels, &dates)?;
    grabber::write_document(&doc, config.output.as_deref())
}
