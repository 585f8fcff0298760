//! Roster CLI - seed dump and intent replay.
//!
//! # Usage
//!
//! ```bash
//! # Print the mock users and roles
//! roster seed --format json
//!
//! # Apply a YAML list of intents and print the final state
//! roster replay script.yaml --strict
//! ```
//!
//! # Commands
//!
//! - `seed` - Print the records the admin panel starts with
//! - `replay` - Run an intent script against an in-process console

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::seed::SeedFormat;

#[derive(Parser)]
#[command(name = "roster")]
#[command(version, about = "Roster users and roles tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the mock users and roles
    Seed {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = SeedFormat::Yaml)]
        format: SeedFormat,
    },
    /// Apply an intent script and print the final console state
    Replay {
        /// YAML file holding a list of intents
        script: PathBuf,

        /// Start from an empty console instead of the mock records
        #[arg(long)]
        empty: bool,

        /// Reject empty names, malformed emails and empty permissions on save
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    // Logs go to stderr so command output stays machine-readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roster=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { format } => commands::seed::print(format)?,
        Commands::Replay {
            script,
            empty,
            strict,
        } => commands::replay::run(&script, empty, strict)?,
    }
    Ok(())
}
