//! Development tasks for the saga workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{ReadState, Simulate};

/// Development tasks for the saga workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the saga engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Read and inspect save files
    ReadState(ReadState),

    /// Run a campaign headless against a content pack
    Simulate(Simulate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SAGA_SAVE_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::ReadState(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
    }
}
