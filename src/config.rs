//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dectree/dectree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `DECTREE__*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{BuildState, TreeBuilder};

/// Errors raised while loading or rendering settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("environment override: {0}")]
    Environment(#[from] config::ConfigError),

    #[error("serialize config: {0}")]
    Serialize(String),
}

/// Tree builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuilderSettings {
    /// State a fresh build starts in
    pub initial_state: BuildState,
    /// Whether Splitting advances to Stopping instead of looping on itself
    pub split_advances: bool,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            initial_state: BuildState::Splitting,
            split_advances: false,
        }
    }
}

impl BuilderSettings {
    pub fn to_builder(&self) -> TreeBuilder {
        TreeBuilder::with_state(self.initial_state).split_advances(self.split_advances)
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Show conditions and predictions next to node names
    pub show_labels: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { show_labels: true }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub builder: RawBuilderSettings,
    pub display: RawDisplaySettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawBuilderSettings {
    pub initial_state: Option<BuildState>,
    pub split_advances: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplaySettings {
    pub show_labels: Option<bool>,
}

/// Unified configuration for dectree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub builder: BuilderSettings,
    pub display: DisplaySettings,
}

/// Get the XDG config directory for dectree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dectree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dectree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            builder: BuilderSettings {
                initial_state: overlay
                    .builder
                    .initial_state
                    .unwrap_or(self.builder.initial_state),
                split_advances: overlay
                    .builder
                    .split_advances
                    .unwrap_or(self.builder.split_advances),
            },
            display: DisplaySettings {
                show_labels: overlay
                    .display
                    .show_labels
                    .unwrap_or(self.display.show_labels),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "Loading global config");
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!(path = %path.display(), "Loading config file");
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply DECTREE__* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("DECTREE").separator("__"))
            .build()?;

        if let Ok(val) = config.get_string("builder.initial_state") {
            settings.builder.initial_state = val.parse().map_err(|message| SettingsError::Parse {
                path: PathBuf::from("DECTREE__BUILDER__INITIAL_STATE"),
                message,
            })?;
        }
        if let Ok(val) = config.get_bool("builder.split_advances") {
            settings.builder.split_advances = val;
        }
        if let Ok(val) = config.get_bool("display.show_labels") {
            settings.display.show_labels = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# dectree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/dectree/dectree.toml
#   File:   --config <FILE>
#   Env:    DECTREE__* environment variables, e.g. DECTREE__BUILDER__INITIAL_STATE=stopping

[builder]
# State a build starts in: "splitting", "stopping" or "pruning"
# initial_state = "splitting"

# Let splitting advance to stopping instead of looping on itself
# split_advances = false

[display]
# Show conditions and predictions next to node names
# show_labels = true
"#
        .to_string()
    }
}
