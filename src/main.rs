use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use stream_logger::config::{CONFIG_FILE_ENV, Settings};
use stream_logger::{create_adapter, telemetry};
use tracing::{debug, error, warn};

/// Write one message through a configured stream logger.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML settings file
    #[arg(long, env = CONFIG_FILE_ENV)]
    config: Option<PathBuf>,

    /// Additional stream destination (`stdout`, `stderr` or a file path); repeatable
    #[arg(long = "stream")]
    streams: Vec<String>,

    /// Minimum level for the additional streams
    #[arg(long, default_value = "debug")]
    stream_level: String,

    /// Level of the message
    #[arg(long, default_value = "info")]
    level: String,

    /// Message to log
    message: String,
}

fn run(cli: Cli) -> Result<bool> {
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let adapter = create_adapter(&settings).context("Failed to configure logger")?;

    for stream in &cli.streams {
        adapter
            .add_stream(stream, &cli.stream_level)
            .with_context(|| format!("Failed to add stream {stream}"))?;
    }

    let handled = adapter.write(&cli.message, &cli.level)?;
    debug!(handled, level = %cli.level, "message written");
    Ok(handled)
}

fn main() -> ExitCode {
    telemetry::init_tracing();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            warn!("No stream accepted the message; configure one with --stream or the settings file");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
