//! CLI module for xrde2e
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `mock` - Run the listMethods mock responder
//! - `dashboard` - Run the terminal status dashboard
//! - `current` - Print the current snapshot once
//! - `history` - Print one security server's history once
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Answer listMethods calls on port 8081
//! xrde2e mock
//!
//! # Watch the monitoring API, refreshing every 30 seconds
//! xrde2e dashboard -u http://monitor:8080 -i 30
//! ```

pub mod completions;
pub mod config;
pub mod dashboard;
pub mod mock;
pub mod output;
pub mod snapshot;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::{ConfigError, E2eConfig};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// xrde2e - listMethods mock and E2E monitoring dashboard
#[derive(Parser, Debug)]
#[command(
    name = "xrde2e",
    version,
    about = "listMethods mock responder and E2E monitoring dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the listMethods mock responder
    Mock(MockArgs),
    /// Run the terminal status dashboard
    Dashboard(DashboardArgs),
    /// Print the current snapshot once
    Current(CurrentArgs),
    /// Print the history of one security server once
    History(HistoryArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct MockArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "xrde2e.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "XRDE2E_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "XRDE2E_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "XRDE2E_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "xrde2e.toml")]
    pub config: PathBuf,

    /// Override monitoring API base URL
    #[arg(short = 'u', long, env = "XRDE2E_MONITOR_URL")]
    pub url: Option<String>,

    /// Override polling interval in seconds
    #[arg(short, long, env = "XRDE2E_POLL_INTERVAL")]
    pub interval: Option<u64>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "XRDE2E_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct CurrentArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "xrde2e.toml")]
    pub config: PathBuf,

    /// Override monitoring API base URL
    #[arg(short = 'u', long, env = "XRDE2E_MONITOR_URL")]
    pub url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Security server identifier
    pub server: String,

    /// Path to configuration file
    #[arg(short, long, default_value = "xrde2e.toml")]
    pub config: PathBuf,

    /// Override monitoring API base URL
    #[arg(short = 'u', long, env = "XRDE2E_MONITOR_URL")]
    pub url: Option<String>,

    /// Maximum number of rows (0 = backend default)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "xrde2e.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load the config file (defaults when missing) and apply environment overrides.
pub fn load_config(path: &Path) -> Result<E2eConfig, ConfigError> {
    Ok(E2eConfig::load_or_default(path)?.with_env_overrides())
}
