//! Triage CLI
//!
//! Thin transport boundary around the answer pipeline: parses arguments,
//! loads configuration, and prints the pipeline's result. All decision
//! logic lives in `triage-pipeline`.

mod commands;

use clap::{Parser, Subcommand};
use commands::AskCommand;
use std::path::PathBuf;
use triage_core::{config::AppConfig, logging, AppResult};

/// Grounded support answers with human handover
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(about = "Answer project-scoped questions from a knowledge base", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: ./triage.yaml)
    #[arg(short, long, global = true, env = "TRIAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question against a project knowledge base
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    let config = config.with_overrides(cli.config, cli.log_level, cli.verbose, cli.no_color);

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::debug!("Completion model: {}", config.completion.model);
    tracing::debug!("Search top-k: {}", config.search.top_k);

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
