//! browsig command line tool: build and inspect browser signatures offline

mod commands;
mod error;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use error::CliResult;

#[derive(Parser)]
#[command(name = "browsig")]
#[command(about = "Build, decode and inspect browser environment signatures")]
#[command(version)]
struct Cli {
    /// Log probe outcomes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a signature from a fixture environment
    Build {
        /// Fixture environment file (TOML)
        #[arg(short, long)]
        fixture: PathBuf,

        /// Builder configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also print the decoded canonical text
        #[arg(long)]
        show_record: bool,
    },

    /// Decode a signature back to its canonical text
    Decode {
        /// The signature token
        token: String,
    },

    /// Print the environment record collected from a fixture as JSON
    Inspect {
        /// Fixture environment file (TOML)
        #[arg(short, long)]
        fixture: PathBuf,

        /// Builder configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            fixture,
            config,
            show_record,
        } => {
            commands::build::handle(fixture, config, show_record).await?;
        }
        Commands::Decode { token } => {
            commands::decode::handle(token)?;
        }
        Commands::Inspect { fixture, config } => {
            commands::inspect::handle(fixture, config).await?;
        }
    }

    Ok(())
}
