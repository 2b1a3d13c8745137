//! Configuration (`.scripty.json`) loading and resolution.

use crate::error::{Result, ScriptyError};
use crate::locator::Marker;
use log::debug;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the scripts directory name.
pub const SCRIPTS_DIR_ENV_VAR: &str = "SCRIPTY_DIR";

/// Scripts directory name used when `SCRIPTY_DIR` is unset.
pub const DEFAULT_SCRIPTS_DIR_NAME: &str = "scripts";

/// Resolved run parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Root directory to enumerate. Absolute once resolved.
    #[serde(
        rename = "scriptsDir",
        alias = "scriptyDir",
        alias = "ScriptyDir",
        default,
        deserialize_with = "null_as_default"
    )]
    pub scripts_dir: PathBuf,

    /// Reserved for command aliases; parsed but not acted on.
    #[serde(
        rename = "extraCommands",
        alias = "ExtraCommands",
        default,
        deserialize_with = "null_as_default"
    )]
    pub extra_commands: HashMap<String, Vec<String>>,
}

/// Read a JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Config {
    /// Turn a located marker into a configuration.
    ///
    /// # Errors
    ///
    /// Fails if the config file cannot be read, is not valid JSON, or does not
    /// name a scripts directory.
    pub fn resolve(marker: &Marker) -> Result<Self> {
        match marker {
            Marker::ConfigFile(path) => Self::load(path),
            Marker::ScriptsDir(dir) => Ok(Self {
                scripts_dir: dir.clone(),
                extra_commands: HashMap::new(),
            }),
        }
    }

    /// Read and parse a config file, making its scripts directory absolute.
    ///
    /// # Errors
    ///
    /// See [`Config::resolve`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ScriptyError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("/"));
        Self::from_json(&content, path, base)
    }

    /// Parse config text; `base` is the directory relative paths are joined to.
    fn from_json(content: &str, path: &Path, base: &Path) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(content).map_err(|source| ScriptyError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        // Empty or null means "not set", never "the config's own directory".
        if config.scripts_dir.as_os_str().is_empty() {
            return Err(ScriptyError::ConfigMissingField {
                path: path.to_path_buf(),
            });
        }

        if config.scripts_dir.is_relative() {
            config.scripts_dir = base.join(&config.scripts_dir);
        }
        debug!("scripts dir from {}: {}", path.display(), config.scripts_dir.display());

        Ok(config)
    }
}

/// Scripts directory name to search for, from `SCRIPTY_DIR` or the default.
#[must_use]
pub fn scripts_dir_name_from_env() -> String {
    match std::env::var(SCRIPTS_DIR_ENV_VAR) {
        Ok(name) if !name.is_empty() => name,
        _ => DEFAULT_SCRIPTS_DIR_NAME.to_string(),
    }
}
