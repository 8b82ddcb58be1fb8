//! Location graph exporter.
//!
//! Loads the source streams, runs the location pipeline and writes
//! `locations.json`, `locations_ordered.json` and `location_summary.json`.
//!
//! Usage:
//!   cargo run -p location_export -- build
//!   cargo run -p location_export -- build --sources data/sources --out out
//!   cargo run -p location_export -- summary
//!   cargo run -p location_export -- normalize SproutTower1F "Route 29"

mod cmd;
mod utils;

use clap::{Parser, Subcommand};
use cmd::{build, normalize, summary};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "location_export", version)]
struct Cli {
    /// Pipeline config file (default: location_export.toml at the project root, if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and write all artifacts
    Build(build::BuildArgs),

    /// Print a previously written location summary
    Summary(summary::SummaryArgs),

    /// Show the canonical key for raw identifiers
    Normalize(normalize::NormalizeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Build(args)) => build::execute(cli.config.as_deref(), args),
        Some(Commands::Summary(args)) => summary::execute(cli.config.as_deref(), args),
        Some(Commands::Normalize(args)) => {
            normalize::execute(args);
            Ok(())
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("location_graph=debug,location_export=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
