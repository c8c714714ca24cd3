#![warn(missing_docs)]

//! Shared logging setup for the capchord workspace.
//!
//! Verbosity flags only raise the level of our own crates, so dependency noise
//! stays out of the way unless an explicit filter asks for it.

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;

/// Tracing targets that count as "our" logs.
pub const OUR_CRATES: &[&str] = &["capchord", "capchord_engine", "keymode", "config", "logging"];

/// Level used when nothing else is requested.
const DEFAULT_LEVEL: &str = "info";

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Log our crates at trace level
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Log our crates at debug level
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Log our crates at LEVEL (error|warn|info|debug|trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Raw tracing filter directive, e.g. "keymode=trace,capchord_engine=debug"
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// Level requested by `--trace`, `--debug` or `--log-level`, in that order.
    fn level(&self) -> Option<&str> {
        if self.trace {
            Some("trace")
        } else if self.debug {
            Some("debug")
        } else {
            self.log_level.as_deref()
        }
    }

    /// Filter directive for these flags, falling back to `RUST_LOG`, then to
    /// `info` for our crates.
    pub fn spec(&self) -> String {
        self.spec_with_env(env::var("RUST_LOG").ok().as_deref())
    }

    /// [`LogArgs::spec`] with the `RUST_LOG` value passed in.
    fn spec_with_env(&self, rust_log: Option<&str>) -> String {
        if let Some(filter) = &self.log_filter {
            return filter.clone();
        }
        if let Some(level) = self.level() {
            return level_spec_for(level);
        }
        rust_log
            .filter(|s| !s.trim().is_empty())
            .map_or_else(|| level_spec_for(DEFAULT_LEVEL), str::to_string)
    }

    /// Build the subscriber filter for these flags.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.spec())
    }
}

/// Filter directive setting `level` for every crate in [`OUR_CRATES`].
pub fn level_spec_for(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    OUR_CRATES
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
