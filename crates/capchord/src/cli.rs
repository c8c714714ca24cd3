//! Command-line interface definitions for capchord.

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `capchord` binary.
#[derive(Parser, Debug)]
#[command(
    name = "capchord",
    about = "Run commands by typing the capital letters of their names",
    version
)]
pub struct Cli {
    /// Logging controls shared across capchord binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Options for the default chord loop.
    #[command(flatten)]
    pub run: RunArgs,

    /// Optional subcommand; without one, chords are read from stdin.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a configuration, build every scope and report conflicts.
    Check(CheckArgs),
}

/// Arguments for the chord loop.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to the configuration file (RON, or JSON by extension).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the chord timeout, e.g. `5s` or `1500ms`.
    #[arg(long, value_parser = humantime::parse_duration, value_name = "DURATION")]
    pub timeout: Option<Duration>,

    /// Treat NAME as the focused application instead of running the focus command.
    #[arg(long, value_name = "NAME")]
    pub app: Option<String>,

    /// Show the full command name when a chord completes.
    #[arg(long)]
    pub announce: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Configuration to check; defaults to the user configuration.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Print every scope's commands and codes as JSON.
    #[arg(long)]
    pub dump: bool,
}
