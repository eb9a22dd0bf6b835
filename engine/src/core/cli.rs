use clap::{Args, Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_MAX_FILTER_JSON_BYTES, ENV_MAX_FILTERS};

#[derive(Parser)]
#[command(name = "sideseat-filter")]
#[command(version, about = "Filter telemetry records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Maximum number of filters accepted
    #[arg(long, global = true, env = ENV_MAX_FILTERS)]
    pub max_filters: Option<usize>,

    /// Maximum filter JSON size in bytes
    #[arg(long, global = true, env = ENV_MAX_FILTER_JSON_BYTES)]
    pub max_filter_json_bytes: Option<usize>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Filter JSON Lines log entries
    Logs(FilterArgs),
    /// Filter JSON Lines spans
    Spans(FilterArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Filters as a JSON array, or @path to read them from a file
    #[arg(long, short = 'f')]
    pub filters: String,

    /// Input file (JSON Lines). Reads stdin when omitted
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,
}

/// CLI overrides passed to config loading
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub max_filters: Option<usize>,
    pub max_filter_json_bytes: Option<usize>,
}

/// Parse CLI arguments into config overrides and the command to run
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        max_filters: cli.max_filters,
        max_filter_json_bytes: cli.max_filter_json_bytes,
    };
    (config, cli.command)
}
