mod types;

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use types::{Config, InputConfig, MatchMode, SuggestionsConfig};

const CONFIG_DIR: &str = "autosuggest";
const CONFIG_FILE: &str = "config.toml";

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the config from the default location, falling back to defaults when
/// there is no config directory or no file.
pub fn load_config() -> Result<Config> {
    let Some(path) = default_config_path() else {
        return Ok(Config::default());
    };

    load_config_from_path(&path)
}

/// A missing file yields the default config; a file that exists but cannot be
/// read or parsed is an error.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    parse_config_toml(&contents)
}

pub fn parse_config_toml(content: &str) -> Result<Config> {
    Ok(toml::from_str::<Config>(content)?)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
