use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rapid_socket::{
    BatchReport, Converter, ConverterConfig, FileConfig, FileOutcome, PathReport, WriteMode,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "rapid-socket")]
#[command(version = VERSION)]
#[command(about = "Convert ABB robot .mod files to add socket communication functionality")]
#[command(after_help = "Examples:\n  rapid-socket /path/to/file.mod rapid\n  rapid-socket /path/to/directory/ klipper")]
struct Cli {
    /// Path to a .mod file or a directory containing .mod files
    path: PathBuf,

    /// Postprocessor type (e.g. 'rapid', 'klipper')
    postprocessor: String,

    /// TOML file with socket and entry-point settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Socket variable name
    #[arg(long)]
    socket_name: Option<String>,

    /// Controller address passed to SocketConnect
    #[arg(long)]
    address: Option<Ipv4Addr>,

    /// Controller port passed to SocketConnect
    #[arg(long)]
    port: Option<u16>,

    /// File that receives socket setup in directory mode
    #[arg(long)]
    entry_point: Option<String>,

    /// Write through a temporary file and rename it over the original
    #[arg(long)]
    atomic: bool,

    /// Log every pass
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn converter_config(&self) -> Result<ConverterConfig> {
        let mut config = ConverterConfig::new(self.postprocessor.as_str());

        if let Some(path) = &self.config {
            config = config.merge(FileConfig::load(path)?);
        }

        // Flags override the file.
        if let Some(name) = &self.socket_name {
            config.socket = config.socket.with_name(name.as_str());
        }
        if let Some(address) = self.address {
            config.socket = config.socket.with_address(address);
        }
        if let Some(port) = self.port {
            config.socket = config.socket.with_port(port);
        }
        if let Some(entry_point) = &self.entry_point {
            config.entry_point = entry_point.clone();
        }
        if self.atomic {
            config.write_mode = WriteMode::Atomic;
        }

        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .init();

    match run(&cli) {
        Ok(()) => {
            println!("Conversion completed successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.converter_config()?;
    log::info!(
        "rapid-socket v{} postprocessor={} socket={} endpoint={}",
        VERSION,
        config.postprocessor,
        config.socket.name,
        config.socket.endpoint
    );
    println!("Postprocessor: {}", config.postprocessor);

    let converter = Converter::new(config).context("setting up converter")?;
    match converter.process_path(&cli.path)? {
        PathReport::File(outcome) => print_outcome(&outcome),
        PathReport::Directory(report) => print_report(&report),
    }
    Ok(())
}

fn print_outcome(outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Converted { path, .. } => println!("Processing File: {}", path.display()),
        FileOutcome::Skipped { path, error } => {
            eprintln!("Error: {} ({})", error, path.display())
        }
    }
}

fn print_report(report: &BatchReport) {
    for outcome in &report.files {
        print_outcome(outcome);
    }
    for entry in &report.unexpected_entries {
        eprintln!("Error: File has no extension: {}", entry.display());
    }
}
