//! The `Config` struct, YAML persistence, path resolution and validation.

use crate::error::ConfigError;
use crate::types::LogLevel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration for the grep-filter plugin.
///
/// Every field has a serde default, so a partial YAML file (or an empty one)
/// yields a usable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Script identifier. Managed filters are named `<script_name>_<buffers>`
    /// and the bar item is registered as `(extra)<script_name>`.
    #[serde(default = "crate::defaults::script_name")]
    pub script_name: String,

    /// Bar item text while a filter exists for the current buffer.
    #[serde(default = "crate::defaults::indicator_label")]
    pub indicator_label: String,

    /// Debug log verbosity.
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script_name: crate::defaults::script_name(),
            indicator_label: crate::defaults::indicator_label(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl Config {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script_name(mut self, name: impl Into<String>) -> Self {
        self.script_name = name.into();
        self
    }

    pub fn with_indicator_label(mut self, label: impl Into<String>) -> Self {
        self.indicator_label = label.into();
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Load configuration from the default path, or defaults when no file exists.
    ///
    /// A missing file is not an error and nothing is written to disk.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);

        let contents = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// An empty (or whitespace-only) document yields the defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml_ng::from_str(contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Save configuration to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = self.to_yaml()?;

        // Atomic save: write to temp file then rename
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check field values that serde cannot express.
    ///
    /// The script name ends up inside a single word of a space-separated
    /// `/filter add` command line.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.script_name.is_empty() {
            return Err(ConfigError::Validation(
                "script_name must not be empty".to_string(),
            ));
        }
        if self
            .script_name
            .chars()
            .any(|c| c.is_whitespace() || c == ',')
        {
            return Err(ConfigError::Validation(format!(
                "script_name '{}' must not contain whitespace or commas",
                self.script_name
            )));
        }
        if self.indicator_label.is_empty() {
            return Err(ConfigError::Validation(
                "indicator_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("grep-filter")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/grep-filter on every Unix, macOS included
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("grep-filter")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
