//! `check` subcommand: validate a configuration without running it.

use std::{path::Path, sync::Arc};

use capchord_engine::{Router, router_from_config};
use keymode::{Clock, SystemClock};
use serde::Serialize;
use tracing::info;

use crate::{cli::CheckArgs, error::Result};

/// One scope's commands as printed by `check --dump`.
#[derive(Debug, Serialize)]
struct ScopeDump<'a> {
    /// Application name; absent for the general scope.
    app: Option<&'a str>,
    /// Commands in declaration order.
    commands: Vec<CommandDump<'a>>,
}

/// A command with its derived chord code.
#[derive(Debug, Serialize)]
struct CommandDump<'a> {
    /// Configured name.
    name: &'a str,
    /// Chord code derived from the name.
    code: &'a str,
    /// Macro payload.
    payload: &'a str,
}

/// Load and validate the configuration, then print `OK` or the JSON dump.
pub fn run(args: &CheckArgs) -> Result<()> {
    let path = config::resolve_config_path(args.path.as_deref())?;
    let report = check_path(&path, args.dump)?;
    println!("{report}");
    Ok(())
}

/// Validate the configuration at `path` and render the report.
fn check_path(path: &Path, dump: bool) -> Result<String> {
    let cfg = config::load_from_path(path)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let router = router_from_config(&cfg, &clock)?;
    info!(path = %path.display(), apps = router.apps().count(), "configuration is valid");
    if dump {
        Ok(serde_json::to_string_pretty(&scopes(&router))?)
    } else {
        Ok("OK".to_string())
    }
}

/// Every scope's commands, general first.
fn scopes(router: &Router<String>) -> Vec<ScopeDump<'_>> {
    router
        .command_sets()
        .map(|set| ScopeDump {
            app: set.app(),
            commands: set
                .commands()
                .iter()
                .map(|cmd| CommandDump {
                    name: &cmd.name,
                    code: &cmd.code,
                    payload: &cmd.payload,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, process};

    use serde_json::Value;

    use super::*;
    use crate::error::Error;

    const EXAMPLE: &str = include_str!("../config.example.ron");

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("capchord-check-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn example_config_is_valid() {
        let path = write_temp("example.ron", EXAMPLE);
        assert_eq!(check_path(&path, false).unwrap(), "OK");
    }

    #[test]
    fn dump_lists_scopes_and_codes() {
        let path = write_temp(
            "dump.json",
            r#"{"general": {"Delete Word": "dw"}, "app_specific": {"firefox": {"Switch Tab": "st"}}}"#,
        );
        let out: Value = serde_json::from_str(&check_path(&path, true).unwrap()).unwrap();
        assert_eq!(out[0]["app"], Value::Null);
        assert_eq!(out[0]["commands"][0]["code"], "dw");
        assert_eq!(out[1]["app"], "firefox");
        assert_eq!(out[1]["commands"][1]["name"], "Switch Tab");
        assert_eq!(out[1]["commands"][1]["code"], "st");
    }

    #[test]
    fn conflicts_are_reported() {
        let path = write_temp(
            "conflict.ron",
            r#"(general: {"Delete Word": "a", "Do Work": "b"})"#,
        );
        let err = check_path(&path, false).unwrap_err();
        assert!(matches!(err, Error::Engine(_)));
        assert!(err.pretty().contains("'DW'"));
    }
}
