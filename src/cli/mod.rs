pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inference_calc")]
#[command(about = "Estimate latency, memory usage and cost of LLM inference", long_about = None)]
struct Cli {
    /// JSON config with request defaults and an optional tables file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a single request
    Calculate {
        /// Model: 7B, 13B or GPT-4
        #[arg(long)]
        model: String,
        /// Tokens (input + output)
        #[arg(long, allow_negative_numbers = true)]
        tokens: i64,
        /// Requests per batch (default: 1)
        #[arg(long, allow_negative_numbers = true)]
        batch_size: Option<i64>,
        /// Hardware: CPU or GPU_4GB through GPU_32GB (default: GPU_8GB)
        #[arg(long)]
        hardware: Option<String>,
        /// Deployment: local or api (default: local)
        #[arg(long)]
        deployment: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare local development against the hosted APIs
    Compare {
        #[arg(long, default_value = "1000")]
        tokens: u64,
    },
    /// Run the reference deployment scenarios
    Scenarios {
        /// Save the full report to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print or export the active specification tables
    Tables {
        /// Write the tables to a JSON file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Calculate {
            model,
            tokens,
            batch_size,
            hardware,
            deployment,
            json,
        } => commands::calculate(
            &config,
            &model,
            tokens,
            batch_size,
            hardware.as_deref(),
            deployment.as_deref(),
            json,
        ),
        Commands::Compare { tokens } => commands::compare(&config, tokens),
        Commands::Scenarios { output } => commands::scenarios(&config, output),
        Commands::Tables { output } => commands::tables(&config, output),
    }
}
