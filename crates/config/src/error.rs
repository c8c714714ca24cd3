//! Error types for configuration loading and validation.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Number of source lines shown before the offending line in an excerpt.
const EXCERPT_CONTEXT: usize = 2;

/// A 1-based position in configuration source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub col: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Errors produced while loading, parsing, or validating a configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The file could not be read, or no file was found.
    #[error("{message}")]
    Read {
        /// File involved, when known.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    /// RON or JSON text that does not describe a configuration.
    #[error("{message} at {location}")]
    Parse {
        /// File involved, when known.
        path: Option<PathBuf>,
        /// Where the parser stopped.
        location: Location,
        /// Parser message.
        message: String,
        /// Source lines around `location` with a caret under the column.
        excerpt: String,
    },
    /// A well-formed configuration with an unusable setting.
    #[error("{field}: {message}")]
    Validation {
        /// File involved, when known.
        path: Option<PathBuf>,
        /// Dotted name of the offending setting.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

impl Error {
    /// Multi-line rendering for terminals: where the problem is, what it is,
    /// and for parse errors the source excerpt.
    pub fn pretty(&self) -> String {
        let place = self.path().map(|p| p.display().to_string());
        match self {
            Self::Read { message, .. } => match place {
                Some(p) => format!("Read error at {p}: {message}"),
                None => format!("Read error: {message}"),
            },
            Self::Parse {
                location,
                message,
                excerpt,
                ..
            } => {
                let at = place.map_or_else(
                    || format!("line {}, column {}", location.line, location.col),
                    |p| format!("{p}:{location}"),
                );
                format!("Config parse error at {at}\n{message}\n{excerpt}")
            }
            Self::Validation { field, message, .. } => {
                let at = place.map(|p| format!(" in {p}")).unwrap_or_default();
                format!("Invalid setting {field}{at}\n{message}")
            }
        }
    }

    /// File this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// Attach `at` as the file this error refers to.
    pub fn with_path(mut self, at: &Path) -> Self {
        match &mut self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                *path = Some(at.to_path_buf());
            }
        }
        self
    }
}

/// Render the lines around `location` with a caret under its column.
pub fn excerpt_at(source: &str, location: Location) -> String {
    let first = location.line.saturating_sub(EXCERPT_CONTEXT).max(1);
    let mut out = String::new();
    for (n, text) in source
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text))
        .skip(first - 1)
        .take_while(|(n, _)| *n <= location.line + 1)
    {
        out.push_str(&format!(" {n:>4} | {text}\n"));
        if n == location.line {
            let pad = " ".repeat(location.col.saturating_sub(1));
            out.push_str(&format!("      | {pad}^\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_points_at_column() {
        let src = "(\n  general: {\n    \"Undo\" 1,\n  },\n)";
        let ex = excerpt_at(src, Location { line: 3, col: 12 });
        let lines: Vec<&str> = ex.lines().collect();
        assert_eq!(lines[0], "    1 | (");
        assert_eq!(lines[2], "    3 |     \"Undo\" 1,");
        assert_eq!(lines[3].find('^'), Some(19));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn excerpt_near_start_and_end() {
        let ex = excerpt_at("only line", Location { line: 1, col: 1 });
        assert_eq!(ex, "    1 | only line\n      | ^\n");
    }

    #[test]
    fn pretty_names_file_and_field() {
        let err = Error::Validation {
            path: None,
            field: "settings.macro_command",
            message: "bad".into(),
        }
        .with_path(Path::new("/tmp/c.ron"));
        assert_eq!(
            err.pretty(),
            "Invalid setting settings.macro_command in /tmp/c.ron\nbad"
        );
        assert_eq!(err.path(), Some(Path::new("/tmp/c.ron")));
        assert_eq!(err.to_string(), "settings.macro_command: bad");
    }

    #[test]
    fn parse_error_display_includes_location() {
        let err = Error::Parse {
            path: None,
            location: Location { line: 2, col: 7 },
            message: "Unexpected token".into(),
            excerpt: String::new(),
        };
        assert_eq!(err.to_string(), "Unexpected token at 2:7");
        assert!(err.pretty().starts_with("Config parse error at line 2, column 7"));
    }
}
