//! Command-line driver for battle matches.
//!
//! Run with: `battle <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Presets, Run};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Resolve grid battles from the command line
#[derive(Parser)]
#[command(name = "battle")]
#[command(about = "Deterministic grid battle runner", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a scenario to completion
    Run(Run),

    /// Inspect a saved field snapshot
    Inspect(Inspect),

    /// List the presets of a catalog
    Presets(Presets),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for BATTLE_* and RUST_LOG)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
        Command::Presets(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
