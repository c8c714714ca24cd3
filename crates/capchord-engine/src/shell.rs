//! Shell-backed collaborators: macro execution and focus detection.
//!
//! Both run a command line through the user's shell and block until it exits.
//! Failures are logged and swallowed; a broken macro or focus probe never stops
//! the engine.

use std::{env, process::Command};

use config::{MACRO_PLACEHOLDER, Settings};
use regex::Regex;
use tracing::{debug, trace, warn};

use crate::{FocusSource, MacroRunner, Result};

/// Shell used when `$SHELL` is unset.
const FALLBACK_SHELL: &str = "/bin/sh";

/// The user's shell, or [`FALLBACK_SHELL`].
fn user_shell() -> String {
    env::var("SHELL").unwrap_or_else(|_| FALLBACK_SHELL.to_string())
}

/// Run `command` with `shell -c` and return its stdout on success.
fn run_shell(shell: &str, command: &str) -> Option<String> {
    trace!(shell, command, "running shell command");
    match Command::new(shell).arg("-c").arg(command).output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                command,
                status = %output.status,
                stderr = %stderr.trim(),
                "shell command failed"
            );
            None
        }
        Err(e) => {
            warn!(command, error = %e, "failed to execute shell command");
            None
        }
    }
}

/// Runs macros by substituting them into a command template.
#[derive(Debug, Clone)]
pub struct ShellMacroRunner {
    /// Command line containing [`MACRO_PLACEHOLDER`].
    template: String,
    /// Shell the command line is passed to.
    shell: String,
}

impl ShellMacroRunner {
    /// Runner for `template`, executed through the user's shell.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            shell: user_shell(),
        }
    }

    /// Runner for the configured `macro_command`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.macro_command.clone())
    }

    /// Use `shell` instead of `$SHELL`.
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// The command line executed for `payload`.
    pub fn command_for(&self, payload: &str) -> String {
        self.template.replace(MACRO_PLACEHOLDER, payload)
    }
}

impl MacroRunner<String> for ShellMacroRunner {
    fn run(&self, payload: &String) {
        let command = self.command_for(payload);
        debug!(%command, "running macro");
        run_shell(&self.shell, &command);
    }
}

/// Asks a shell command which application has focus.
#[derive(Debug, Clone)]
pub struct ShellFocus {
    /// Command printing information about the focused window.
    command: String,
    /// Extracts the application name from the command's output.
    pattern: Option<Regex>,
    /// Shell the command is passed to.
    shell: String,
}

impl ShellFocus {
    /// Focus probe running `command`, optionally filtered through `pattern`.
    pub fn new(command: impl Into<String>, pattern: Option<Regex>) -> Self {
        Self {
            command: command.into(),
            pattern,
            shell: user_shell(),
        }
    }

    /// Focus probe for the configured settings, or `None` when focus detection
    /// is disabled.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        let pattern = settings.focus_regex()?;
        Ok(settings
            .focus_command
            .as_ref()
            .map(|cmd| Self::new(cmd.clone(), pattern)))
    }

    /// Use `shell` instead of `$SHELL`.
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Pull the application name out of the probe's output.
    ///
    /// With a pattern, the `app` group wins, then group 1, then the whole
    /// match; no match yields `""`. Without a pattern the trimmed output is used.
    pub fn extract(&self, output: &str) -> String {
        let Some(re) = &self.pattern else {
            return output.trim().to_string();
        };
        re.captures(output)
            .and_then(|caps| caps.name("app").or_else(|| caps.get(1)).or_else(|| caps.get(0)))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

impl FocusSource for ShellFocus {
    fn active_application(&self) -> String {
        match run_shell(&self.shell, &self.command) {
            Some(output) => self.extract(&output),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_is_substituted() {
        let r = ShellMacroRunner::new("xdotool key {macro}");
        assert_eq!(
            r.command_for("Control_L+Left Shift+Control_L+Right Delete"),
            "xdotool key Control_L+Left Shift+Control_L+Right Delete"
        );
    }

    #[test]
    fn default_settings_use_xdotool() {
        let r = ShellMacroRunner::from_settings(&Settings::default());
        assert_eq!(r.command_for("ctrl+z"), "xdotool key ctrl+z");
    }

    #[test]
    fn extract_prefers_named_group() {
        let re = Regex::new(r#"WM_CLASS\(STRING\) = "[^"]*", "(?P<app>[^"]*)""#).unwrap();
        let f = ShellFocus::new("true", Some(re));
        let out = "WM_CLASS(STRING) = \"Navigator\", \"Firefox\"\n";
        assert_eq!(f.extract(out), "Firefox");
        assert_eq!(f.extract("WM_CLASS:  not found.\n"), "");
    }

    #[test]
    fn extract_falls_back_to_first_group_then_match() {
        let f = ShellFocus::new("true", Some(Regex::new(r"class=(\w+)").unwrap()));
        assert_eq!(f.extract("id=3 class=xterm"), "xterm");
        let f = ShellFocus::new("true", Some(Regex::new(r"[a-z]+").unwrap()));
        assert_eq!(f.extract("  firefox  "), "firefox");
    }

    #[test]
    fn extract_without_pattern_trims() {
        let f = ShellFocus::new("true", None);
        assert_eq!(f.extract("  code\n"), "code");
    }

    #[test]
    fn focus_disabled_in_settings() {
        let settings = Settings {
            focus_command: None,
            ..Settings::default()
        };
        assert!(ShellFocus::from_settings(&settings).unwrap().is_none());
        assert!(
            ShellFocus::from_settings(&Settings::default())
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn focus_command_output_is_read() {
        let f = ShellFocus::new("echo firefox", None).with_shell("/bin/sh");
        assert_eq!(f.active_application(), "firefox");
        let f = ShellFocus::new("exit 3", None).with_shell("/bin/sh");
        assert_eq!(f.active_application(), "");
    }
}
