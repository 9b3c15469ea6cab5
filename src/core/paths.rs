// src/core/paths.rs

use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::{CONFIG_FILENAME, CONFIG_PATH_ENV};

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find the home directory.")]
    HomeDirNotFound,
    #[error("Could not expand config path '{path}': {reason}")]
    Expansion { path: String, reason: String },
}

/// Returns the location of the configuration file.
///
/// `OPIE_CONFIG` wins when set (with `~` and `$VAR` expanded), otherwise the
/// file lives at `~/.opie.json`.
pub fn get_config_path() -> Result<PathBuf, PathError> {
    match env::var(CONFIG_PATH_ENV) {
        Ok(template) if !template.trim().is_empty() => expand_path(&template),
        _ => dirs::home_dir()
            .map(|home| home.join(CONFIG_FILENAME))
            .ok_or(PathError::HomeDirNotFound),
    }
}

/// Expands the home directory and environment variables in a path template.
pub fn expand_path(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template.trim()).map_err(|e| PathError::Expansion {
        path: template.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}
