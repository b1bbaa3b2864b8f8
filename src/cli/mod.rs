//! Command-line surface of the `clipbridge` binary.

pub mod copy;
pub mod watch;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "clipbridge",
    version,
    about = "Watch and write the system clipboard through a permission-gated bridge"
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll the clipboard and print every observed value
    Watch(WatchArgs),
    /// Write text to the clipboard
    Copy(CopyArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Stop after this many observations
    #[arg(long, value_name = "N")]
    pub max_events: Option<usize>,

    /// Override the configured poll interval
    #[arg(long, value_name = "MS")]
    pub update_frequency_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CopyArgs {
    /// Text to place on the clipboard
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    /// One JSON object per line
    Json,
}
