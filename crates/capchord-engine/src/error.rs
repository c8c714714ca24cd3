use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the capchord engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A scope's command set failed validation.
    #[error("Invalid command set: {0}")]
    Keymode(#[from] keymode::Error),

    /// Configuration could not be used.
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),
}
