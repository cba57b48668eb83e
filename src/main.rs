//! modcfg - Build-configuration resolver CLI
//!
//! Entry point: initializes logging, parses the command line, and dispatches
//! to the selected command.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use modcfg::commands::{CleanCommand, ResolveCommand};
use modcfg_core::{APP_NAME, VERSION};

/// Command-line interface
#[derive(Debug, Parser)]
#[command(
    name = "modcfg",
    version,
    about = "Build-configuration resolver for multi-module project trees"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve the project tree and print the configuration mapping
    Resolve(ResolveCommand),
    /// Delete the shared build-output directory
    Clean(CleanCommand),
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so resolved output on stdout stays machine-readable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("{} v{}", APP_NAME, VERSION);

    let cli = Cli::parse();
    match cli.command {
        Command::Resolve(cmd) => cmd.execute().await,
        Command::Clean(cmd) => cmd.execute().await,
    }
}
