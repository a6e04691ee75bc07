//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
//! 3. Local config: `<dir>/.famtree.toml` (usually the working directory)
//! 4. Environment variables: `FAMTREE_*` prefix, `__` between nested keys

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Error, Debug)]
#[error("config error: {message}")]
pub struct SettingsError {
    pub message: String,
}

impl SettingsError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Names used when `mrca` is run without arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuerySettings {
    pub first: String,
    pub second: String,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            first: "Bilbo".into(),
            second: "Frodo".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawQuerySettings {
    pub first: Option<String>,
    pub second: Option<String>,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub pretty: Option<bool>,
    pub query: RawQuerySettings,
}

/// Unified configuration for famtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory offered for interactive tree file selection (default: ./data)
    pub data_dir: PathBuf,
    /// Extension of tree files, without the dot (default: txt)
    pub extension: String,
    /// Render trees with box-drawing connectors instead of plain indentation
    pub pretty: bool,
    /// Default MRCA query
    pub query: QuerySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            extension: "txt".into(),
            pretty: false,
            query: QuerySettings::default(),
        }
    }
}

/// Get the XDG config directory for famtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famtree.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".famtree.toml")
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input untouched.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SettingsError::new(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| SettingsError::new(format!("parse {}: {}", path.display(), e)))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.famtree.toml`
    #[instrument(level = "debug")]
    pub fn load(local_dir: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = current.apply_env_overrides(Self::environment())?;
        current.expand_paths();

        Ok(current)
    }

    fn environment() -> Environment {
        Environment::with_prefix("FAMTREE")
            .prefix_separator("_")
            .separator("__")
    }

    /// Scalar overlay: a specified value wins, otherwise keep self.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            extension: overlay
                .extension
                .clone()
                .unwrap_or_else(|| self.extension.clone()),
            pretty: overlay.pretty.unwrap_or(self.pretty),
            query: QuerySettings {
                first: overlay
                    .query
                    .first
                    .clone()
                    .unwrap_or_else(|| self.query.first.clone()),
                second: overlay
                    .query
                    .second
                    .clone()
                    .unwrap_or_else(|| self.query.second.clone()),
            },
        }
    }

    /// Apply environment variables as explicit overrides.
    fn apply_env_overrides(mut self, environment: Environment) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(environment)
            .build()
            .map_err(|e| SettingsError::new(e.to_string()))?;

        if let Ok(val) = config.get_string("data_dir") {
            self.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("extension") {
            self.extension = val;
        }
        if let Ok(val) = config.get_bool("pretty") {
            self.pretty = val;
        }
        if let Ok(val) = config.get_string("query.first") {
            self.query.first = val;
        }
        if let Ok(val) = config.get_string("query.second") {
            self.query.second = val;
        }

        Ok(self)
    }

    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_dir.to_string_lossy().as_ref());
        self.data_dir = PathBuf::from(expanded);
    }

    /// Directory to scan for tree files: `data_dir`, or `.` when it does not exist.
    pub fn selection_dir(&self) -> PathBuf {
        if self.data_dir.is_dir() {
            self.data_dir.clone()
        } else {
            PathBuf::from(".")
        }
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::new(e.to_string()))
    }
}
