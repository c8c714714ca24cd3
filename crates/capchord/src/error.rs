//! Error handling for the capchord binary.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for capchord operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that stop the binary at startup.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Configuration could not be read, parsed or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),
    /// The engine rejected the configuration.
    #[error(transparent)]
    Engine(#[from] capchord_engine::Error),
    /// Failed to render the `check --dump` output.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Human-friendly rendering; configuration errors include their source excerpt.
    pub fn pretty(&self) -> String {
        match self {
            Self::Config(e) | Self::Engine(capchord_engine::Error::Config(e)) => e.pretty(),
            other => other.to_string(),
        }
    }
}
