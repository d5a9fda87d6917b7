//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// extdeck - Extension catalog inspector
#[derive(Parser, Debug)]
#[command(name = "extdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to config.yaml (defaults to ~/.extdeck/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the merged catalog for a snapshot file
    List(ListArgs),

    /// Print catalog entries whose name contains a query
    Filter(FilterArgs),

    /// Simulate installing an available extension and show its progress
    Install(InstallArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Options shared by every command that reads a snapshot
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// YAML or JSON file with installed, untrusted and available records
    #[arg(short, long)]
    pub snapshot: Utf8PathBuf,

    /// Enabled language tags (repeatable, overrides config)
    #[arg(short, long = "lang", value_name = "LANG")]
    pub languages: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Case-insensitive substring of the display name
    pub query: String,

    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Package name of the extension to install
    pub package: String,

    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Delay between simulated install steps, in milliseconds
    #[arg(long, default_value_t = 300)]
    pub step_ms: u64,

    /// Make the simulated install end with an error
    #[arg(long)]
    pub fail: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
