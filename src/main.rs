use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use peerdump::config::{validate_config, Config, ConfigLoader, LoggingConfig, DEFAULT_CONFIG_FILE};
use peerdump::CaptureFidelity;

/// Write a minidump of this process or of another running instance
#[derive(Debug, Parser)]
#[command(name = "peerdump", version, about)]
struct Cli {
    /// Configuration file; defaults apply when it doesn't exist
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Overrides `[capture] fidelity`
    #[arg(long)]
    fidelity: Option<CaptureFidelity>,

    /// Allocate a console for the duration of the run
    #[arg(long)]
    console: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dump the peerdump process itself
    #[command(name = "self")]
    Own,
    /// Dump the other running instance of this executable
    Other,
    /// List the processes a peer is looked up in
    List {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = ConfigLoader::new(&cli.config)
        .load_or_default()
        .with_context(|| format!("failed to load '{}'", cli.config.display()))?;
    validate_config(&config)?;

    init_logging(&config.logging)?;
    info!("peerdump v{}", env!("CARGO_PKG_VERSION"));

    run(&cli, &config)
}

/// RUST_LOG wins over the configured level
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("invalid log level")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

#[cfg(not(windows))]
fn run(_cli: &Cli, _config: &Config) -> Result<ExitCode> {
    anyhow::bail!("peerdump only supports Windows");
}

#[cfg(windows)]
fn run(cli: &Cli, config: &Config) -> Result<ExitCode> {
    use peerdump::windows::{ConsoleGuard, SystemApi};
    use peerdump::{report, CoreDumper};

    let _console = if cli.console {
        Some(ConsoleGuard::new().context("failed to set up a console")?)
    } else {
        None
    };

    let fidelity = cli.fidelity.unwrap_or(config.capture.fidelity);
    let dumper = CoreDumper::with_settings(SystemApi, config.capture_settings());

    let captured = match &cli.command {
        Command::Own => report(dumper.capture_self(fidelity)),
        Command::Other => report(dumper.capture_other(fidelity)),
        Command::List { json } => {
            let records = dumper.list_processes()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &records {
                    println!("{:>8}  {}", record.pid, record.image_file_name);
                }
            }
            true
        }
    };

    Ok(if captured {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
