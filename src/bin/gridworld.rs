//! gridworld CLI - Tabular Q-learning in small grid worlds
//!
//! This CLI provides a unified interface for:
//! - Training a Q-learning agent and printing its learned policy
//! - Writing the default experiment configuration for editing

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gridworld")]
#[command(version, about = "Tabular Q-learning in a grid world", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent and report the learned policy
    Train(Box<gridworld::cli::commands::train::TrainArgs>),

    /// Print the default experiment configuration
    Config(gridworld::cli::commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    gridworld::cli::logging::init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(args) => gridworld::cli::commands::train::execute(*args),
        Commands::Config(args) => gridworld::cli::commands::config::execute(args),
    }
}
