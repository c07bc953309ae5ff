//! Configuration file loading and parsing.
//!
//! Style rules come from two files: a global config (line widths,
//! clearances, text placement) and a series config (naming templates,
//! orientation words). The series config is layered over the global one
//! key by key at the top level, then the result is validated.
//!
//! Files ending in `.yaml` or `.yml` are read as YAML, anything else as
//! JSON. Both must contain a mapping at the top level.
//!
//! # Configuration File Locations
//!
//! The global configuration file is searched in the following order:
//!
//! 1. Path specified via `--global-config`
//! 2. Default location, used only if it exists:
//!    - **Linux/macOS:** `~/.harwin-footprints/config.json`
//!    - **Windows:** `%USERPROFILE%\.harwin-footprints\config.json`
//!
//! Without any file the built-in KLC v3 defaults apply.

mod settings;

pub use settings::{
    Config, CourtyardOffset, LoggingConfig, TextFieldConfig, TextFont, TextPosition,
};

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.harwin-footprints/`
/// - **Windows:** `%USERPROFILE%\.harwin-footprints\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".harwin-footprints"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads, merges and validates the global and series configuration files.
///
/// If `global` is `None`, the default location is used when a file exists
/// there. Keys in `series` replace the same top-level keys of the global
/// config.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given file does not exist or cannot be read
/// - A file is not a JSON object
/// - The merged keys do not match the expected structure
/// - Validation fails
pub fn load_config(global: Option<&Path>, series: Option<&Path>) -> Result<Config, ConfigError> {
    let global_path = match global {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    };

    let mut merged = Map::new();
    for path in global_path.iter().map(PathBuf::as_path).chain(series) {
        debug!(path = %path.display(), "Reading configuration");
        merge_into(&mut merged, read_object(path)?);
    }

    config_from_map(merged)
}

/// Builds a validated [`Config`] from an already merged key/value mapping.
///
/// # Errors
///
/// Returns an error if the mapping does not deserialise or fails validation.
pub fn config_from_map(map: Map<String, Value>) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_value(Value::Object(map))
        .map_err(|source| ConfigError::StructureError { source })?;

    config.validate()?;
    for key in config.ignored_keys() {
        debug!(key, "Ignoring configuration key");
    }

    Ok(config)
}

/// Shallow merge: every top-level key of `overlay` replaces the one in `base`.
fn merge_into(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}

fn read_object(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value: Value = if is_yaml(path) {
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::YamlParseError {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::ValidationError {
            message: format!("{} must contain a mapping", path.display()),
        }),
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
