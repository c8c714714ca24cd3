//! Configuration types, loading and validation for capchord.
//!
//! A configuration holds a `settings` block plus the `general` and
//! `app_specific` command tables. Files are RON unless they end in `.json`.

use std::{
    env,
    path::{Path, PathBuf},
};

mod defaults;
mod error;
mod loader;
mod types;

#[cfg(test)]
mod test_parse;

pub use defaults::MACRO_PLACEHOLDER;
pub use error::{Error, Location, excerpt_at};
pub use loader::{Format, load_from_path, load_from_str};
pub use types::{ChordConfig, CommandMap, Settings};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "CAPCHORD_CONFIG";

/// `~/.capchord/config.ron`.
pub fn default_config_path() -> PathBuf {
    let home = env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".capchord").join("config.ron")
}

/// Pick the configuration file to load: `explicit`, then `$CAPCHORD_CONFIG`,
/// then [`default_config_path`] if it exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    let from_env = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty());
    resolve_with(explicit, from_env.map(PathBuf::from), default_config_path())
}

/// [`resolve_config_path`] with the environment and home lookups passed in.
fn resolve_with(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    fallback: PathBuf,
) -> Result<PathBuf, Error> {
    match (explicit, from_env) {
        (Some(path), _) => Ok(path.to_path_buf()),
        (None, Some(path)) => Ok(path),
        (None, None) if fallback.exists() => Ok(fallback),
        (None, None) => Err(Error::Read {
            message: format!(
                "no configuration found; create {} or pass --config",
                fallback.display()
            ),
            path: Some(fallback),
        }),
    }
}
