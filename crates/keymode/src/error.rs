use std::{fmt::Write as _, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for the keymode crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors raised while building a command set. All of them are configuration
/// problems; matching itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two or more commands share a code, or one code is a prefix of another.
    #[error("{}", conflict_message(app.as_deref(), code, names))]
    Conflict {
        /// Application scope, `None` for the general scope.
        app: Option<String>,
        /// The contested code, upper-cased.
        code: String,
        /// Full names of every colliding command, in declaration order.
        names: Vec<String>,
    },
    /// A command name has no capitalised letters, so it cannot be chorded.
    #[error("{}", empty_code_message(app.as_deref(), name))]
    EmptyCode {
        /// Application scope, `None` for the general scope.
        app: Option<String>,
        /// Full name of the offending command.
        name: String,
    },
}

/// Render a conflict error message.
fn conflict_message(app: Option<&str>, code: &str, names: &[String]) -> String {
    let mut out = format!("conflicting chord code '{code}'");
    if let Some(app) = app {
        let _ignored = write!(out, " for application '{app}'");
    }
    let quoted: Vec<String> = names.iter().map(|n| format!("\"{n}\"")).collect();
    let _ignored = write!(out, ": {}", quoted.join(", "));
    out
}

/// Render an empty-code error message.
fn empty_code_message(app: Option<&str>, name: &str) -> String {
    match app {
        Some(app) => format!(
            "command \"{name}\" for application '{app}' has no capitalised letters to chord"
        ),
        None => format!("command \"{name}\" has no capitalised letters to chord"),
    }
}
