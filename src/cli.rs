//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// taskgate CLI.
#[derive(Debug, Parser)]
#[command(name = "taskgate")]
#[command(about = "Task API gateway for the agent and data-provider backends")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "TASKGATE_CONFIG",
        default_value = "/etc/taskgate/config.yaml"
    )]
    pub config: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check: bool,
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}
