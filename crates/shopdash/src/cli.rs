//! Command line interface.

use clap::{Parser, Subcommand, ValueEnum};
use shopdash_config::Config;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "shopdash", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (.yaml, .yml or .toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend API root, e.g. http://localhost:8000/api/v1
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token sent to the backend
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Log filter, e.g. debug or shopdash_analytics=trace
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// What to do; prints a JSON snapshot when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch once and print the aggregated dashboard
    Snapshot {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Fetch once and print the chart payloads as JSON
    Charts {
        /// Bars in the most ordered products chart, overrides the configuration
        #[arg(long)]
        top: Option<usize>,
    },

    /// Refresh on the configured interval until interrupted
    Watch {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// How a snapshot is printed.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Human readable summary
    Text,
}

impl Args {
    /// The subcommand to run.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Snapshot {
            format: OutputFormat::Json,
        })
    }

    /// Applies the flags that take precedence over file and environment settings.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.backend.base_url = url.clone();
        }
        if let Some(token) = &self.token {
            config.backend.token = Some(token.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
