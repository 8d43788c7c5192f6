//! Config command - Print or write the default experiment configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::ExperimentConfig;

#[derive(Parser, Debug)]
#[command(about = "Print the default experiment configuration as JSON")]
pub struct ConfigArgs {
    /// Write to this file instead of stdout
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: ConfigArgs) -> Result<()> {
    let config = ExperimentConfig::default();
    match args.output {
        Some(path) => {
            config
                .save(&path)
                .with_context(|| format!("failed to write config {}", path.display()))?;
            println!("Default configuration written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
