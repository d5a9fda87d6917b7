//! extdeck CLI - Inspect the extension catalog
//!
//! Feeds a snapshot file through the catalog engine and prints the grouped
//! result, or simulates an install to show per-item progress.

mod cli;
mod commands;
mod manager;
mod output;
mod snapshot;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::List(args) => commands::list::run(args, cli.config.as_deref()).await,
        Commands::Filter(args) => commands::filter::run(args, cli.config.as_deref()).await,
        Commands::Install(args) => commands::install::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => commands::config::run(args, cli.config.as_deref()),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Catalog output goes to stdout, so logs stay on stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
