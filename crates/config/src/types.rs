//! Core configuration data types used in the config crate.

use std::time::Duration;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    Error,
    defaults::{
        MACRO_PLACEHOLDER, default_focus_command, default_focus_pattern, default_macro_command,
        default_timeout_ms,
    },
};

/// Command name → macro payload, in declaration order.
pub type CommandMap = IndexMap<String, String>;

/// Full configuration: runtime settings plus the general and per-application
/// command tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChordConfig {
    /// Runtime settings.
    #[serde(default)]
    pub settings: Settings,
    /// Commands available in every application.
    #[serde(default)]
    pub general: CommandMap,
    /// Per-application commands, merged over `general` by name.
    #[serde(default)]
    pub app_specific: IndexMap<String, CommandMap>,
}

impl ChordConfig {
    /// Check settings that serde cannot: the macro placeholder and the focus regex.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.settings.macro_command.contains(MACRO_PLACEHOLDER) {
            return Err(Error::Validation {
                path: None,
                field: "settings.macro_command",
                message: format!(
                    "must contain {MACRO_PLACEHOLDER}, got {:?}",
                    self.settings.macro_command
                ),
            });
        }
        self.settings.focus_regex()?;
        Ok(())
    }

    /// Names of applications that carry their own commands.
    pub fn apps(&self) -> impl Iterator<Item = &str> {
        self.app_specific.keys().map(String::as_str)
    }
}

/// Runtime settings. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Idle gap (milliseconds) after which a partial chord is discarded.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Show the full command name when a chord completes.
    #[serde(default)]
    pub announce_completion: bool,
    /// Shell command run for a completed chord; `{macro}` is replaced by the payload.
    #[serde(default = "default_macro_command")]
    pub macro_command: String,
    /// Shell command printing information about the focused application.
    /// `None` disables focus detection, so only general commands apply.
    #[serde(
        default = "default_focus_command",
        deserialize_with = "de_opt_string"
    )]
    pub focus_command: Option<String>,
    /// Regex extracting the application name from `focus_command` output. The
    /// `app` group is used when present, else group 1, else the whole output.
    #[serde(
        default = "default_focus_pattern",
        deserialize_with = "de_opt_string"
    )]
    pub focus_pattern: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            announce_completion: false,
            macro_command: default_macro_command(),
            focus_command: default_focus_command(),
            focus_pattern: default_focus_pattern(),
        }
    }
}

impl Settings {
    /// Chord timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Compile `focus_pattern`, if set.
    pub fn focus_regex(&self) -> Result<Option<Regex>, Error> {
        self.focus_pattern
            .as_deref()
            .map(|p| {
                Regex::new(p).map_err(|e| Error::Validation {
                    path: None,
                    field: "settings.focus_pattern",
                    message: format!("not a valid regex: {e}"),
                })
            })
            .transpose()
    }
}

// Helper: accept either a plain string or an Option<String>
fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    /// Either spelling of an optional string.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Helper {
        /// Bare string.
        S(String),
        /// Explicit option.
        Opt(Option<String>),
    }
    match Helper::deserialize(deserializer)? {
        Helper::S(s) => Ok(Some(s)),
        Helper::Opt(o) => Ok(o),
    }
}
