// src/core/config.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{
    constants::{DEFAULT_REGION, ENDPOINT_ENV},
    core::paths::{self, PathError},
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    #[error("Could not access config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Config file '{path}' is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid stack id")]
    InvalidStackId,
    #[error("Stack id '{id}' is already configured.")]
    DuplicateStackId { id: String },
}

type ConfigResult<T> = Result<T, ConfigError>;

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// The user's configuration: which region to talk to and which stacks to inspect.
///
/// Loaded once before a command runs and passed explicitly to whoever needs it.
/// Only `add_stack_id` mutates it, and every mutation is persisted right away.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(rename = "awsRegion", default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub stack_ids: Vec<String>,
    /// Overrides the regional service endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip)]
    path: PathBuf,
}

impl Config {
    /// A default configuration bound to `path`. Nothing is written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            region: default_region(),
            stack_ids: Vec::new(),
            endpoint: None,
            path: path.into(),
        }
    }

    /// Loads the configuration from its default location.
    pub fn load() -> ConfigResult<Self> {
        Self::load_or_create(paths::get_config_path()?)
    }

    /// Reads the configuration at `path`, writing a default one first if the
    /// file does not exist yet.
    pub fn load_or_create(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!(
                    "No config found at '{}'. Creating a default one.",
                    path.display()
                );
                let config = Self::new(path);
                config.save()?;
                return Ok(config);
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let mut config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.display().to_string(),
                source,
            })?;
        config.path = path;

        let mut seen = HashSet::new();
        for id in &config.stack_ids {
            if !seen.insert(id.as_str()) {
                log::warn!("Stack id '{}' appears more than once in the config.", id);
            }
        }

        log::debug!(
            "Loaded config from '{}' ({} stack(s), region '{}').",
            config.path.display(),
            config.stack_ids.len(),
            config.region
        );
        Ok(config)
    }

    /// Where this configuration is persisted.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the configuration as JSON indented with four spaces.
    pub fn save(&self) -> ConfigResult<()> {
        let io_err = |source| ConfigError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut bytes = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
        self.serialize(&mut serializer)
            .map_err(|source| ConfigError::Json {
                path: self.path.display().to_string(),
                source,
            })?;
        bytes.push(b'\n');

        fs::write(&self.path, bytes).map_err(io_err)?;
        log::debug!("Saved config to '{}'.", self.path.display());
        Ok(())
    }

    /// Appends a stack id and persists the result.
    ///
    /// Blank and already-configured ids are rejected. If the write fails the
    /// in-memory list is left as it was.
    pub fn add_stack_id(&mut self, stack_id: &str) -> ConfigResult<()> {
        let stack_id = stack_id.trim();
        if stack_id.is_empty() {
            return Err(ConfigError::InvalidStackId);
        }
        if self.stack_ids.iter().any(|id| id == stack_id) {
            return Err(ConfigError::DuplicateStackId {
                id: stack_id.to_string(),
            });
        }

        self.stack_ids.push(stack_id.to_string());
        if let Err(e) = self.save() {
            self.stack_ids.pop();
            return Err(e);
        }
        Ok(())
    }

    /// An endpoint to use instead of the regional one: `OPIE_ENDPOINT`, then
    /// the configured `endpoint`. `None` lets the SDK pick the regional endpoint.
    pub fn endpoint_override(&self) -> Option<String> {
        env::var(ENDPOINT_ENV)
            .ok()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| self.endpoint.clone())
    }
}
