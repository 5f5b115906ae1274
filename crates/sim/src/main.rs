//! Demo driver for the possession model.
//!
//! Builds small worlds and walks them through equipping, nesting, dukat
//! handling and combat, logging every step through `tracing`.
//! Run with: `cargo run -p possession-sim -- <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Duel, Scenarios, WorldArgs};

/// Possession model demo driver
#[derive(Parser)]
#[command(name = "possession-sim")]
#[command(about = "Drive a possession world from the command line", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    world: WorldArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run the reference scenarios and report each result
    Scenarios(Scenarios),

    /// Let two monsters fight until one dies
    Duel(Duel),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.world.into_config()?;

    match cli.command {
        Command::Scenarios(cmd) => cmd.execute(config),
        Command::Duel(cmd) => cmd.execute(config),
    }
}
