//! Reading configuration files from disk.

use std::{fs, path::Path};

use tracing::debug;

use crate::{ChordConfig, Error, Location, error::excerpt_at};

/// Supported on-disk syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Rusty Object Notation (the default).
    Ron,
    /// JSON, selected by a `.json` extension.
    Json,
}

impl Format {
    /// Choose a format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Ron,
        }
    }
}

/// Load, parse and validate a configuration file.
pub fn load_from_path(path: &Path) -> Result<ChordConfig, Error> {
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: format!("Failed to read config: {e}"),
    })?;
    let cfg = load_from_str(&source, Format::from_path(path)).map_err(|e| e.with_path(path))?;
    debug!(
        path = %path.display(),
        general = cfg.general.len(),
        apps = cfg.app_specific.len(),
        "config loaded"
    );
    Ok(cfg)
}

/// Parse and validate configuration text.
pub fn load_from_str(source: &str, format: Format) -> Result<ChordConfig, Error> {
    let cfg = match format {
        Format::Ron => ron::from_str::<ChordConfig>(source).map_err(|e| {
            let location = Location {
                line: e.span.start.line,
                col: e.span.start.col,
            };
            parse_error(source, location, e.code.to_string())
        })?,
        Format::Json => serde_json::from_str::<ChordConfig>(source).map_err(|e| {
            let location = Location {
                line: e.line(),
                col: e.column(),
            };
            parse_error(source, location, e.to_string())
        })?,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Parse error at `location` with an excerpt of `source`.
fn parse_error(source: &str, location: Location, message: String) -> Error {
    Error::Parse {
        path: None,
        location,
        message,
        excerpt: excerpt_at(source, location),
    }
}
