use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Federation Redeem Script Classifier
#[derive(Parser)]
#[command(name = "redeem-script-parser")]
#[command(about = "Classify federation redeem scripts and P2SH spending scripts")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify a single hex-encoded script
    Classify(commands::classify::ClassifyCommand),
    /// Classify every script in a CSV file (columns: id, script_hex)
    Batch(commands::batch::BatchCommand),
}

pub fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture debug!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())
        .map_err(|e| AppError::Config(format!("Failed to load configuration: {}", e)))?;

    match cli.command {
        Commands::Classify(command) => command.run(&config),
        Commands::Batch(command) => command.run(&config).map(|_| ()),
    }
}
