use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Request tracker period reports
#[derive(Parser)]
#[command(name = "overseer-reports")]
#[command(about = "Gap-free monthly reports over tracked requests")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Import users and requests from CSV into the request store
    Import(commands::import::ImportCommand),
    /// Generate a report from the request store
    Report(commands::report::ReportCommand),
}

pub fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import(command) => command.run(),
        Commands::Report(command) => command.run(),
    }
}
