//! Note Pricer CLI
//!
//! # Commands
//!
//! - `note-pricer run [--scenarios <file>] [--output <file>]` - Price note scenarios
//! - `note-pricer option --spot .. --strike ..` - Price a vanilla option

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service_cli::commands::{self, option::OptionArgs};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Binomial lattice note pricer
#[derive(Parser)]
#[command(name = "note-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price barrier booster note scenarios on the knockout lattice
    Run {
        /// Scenario file (TOML); the built-in S1-S5 set when omitted
        #[arg(short, long)]
        scenarios: Option<PathBuf>,

        /// Report file the results are appended to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Price a vanilla option on the plain lattice
    #[command(name = "option")]
    Vanilla(OptionArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run { scenarios, output } => {
            commands::run::run(scenarios.as_deref(), output.as_deref())?;
        }
        Commands::Vanilla(args) => {
            commands::option::run(&args)?;
        }
    }

    Ok(())
}
