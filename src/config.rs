//! Application configuration
//!
//! Parses `softly.toml`. Every field is optional; a missing file means
//! defaults throughout.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::model::{Settings, Theme, DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_DURATION};

/// Settings applied to a profile that has never been saved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// Target cycle length in days (default: 28)
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,
    /// Presumed period duration in days (default: 4)
    #[serde(default = "default_period_duration")]
    pub period_duration: u32,
    /// Initial theme (default: light)
    #[serde(default)]
    pub theme: Theme,
}

const fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH
}

const fn default_period_duration() -> u32 {
    DEFAULT_PERIOD_DURATION
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            period_duration: DEFAULT_PERIOD_DURATION,
            theme: Theme::Light,
        }
    }
}

impl DefaultsConfig {
    /// As engine settings
    #[must_use]
    pub const fn settings(&self) -> Settings {
        Settings {
            cycle_length: self.cycle_length,
            period_duration: self.period_duration,
            theme: self.theme,
        }
    }
}

/// Top-level configuration parsed from softly.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Namespace for stored documents
    #[serde(default = "default_app_id")]
    pub app_id: String,
    /// Directory holding profiles, the identity file and the journal
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Pre-provisioned identity token; anonymous identity is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Settings for new profiles
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

fn default_app_id() -> String {
    "softly-period-tracker".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".softly")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            data_dir: default_data_dir(),
            auth_token: None,
            defaults: DefaultsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a softly.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse the file at `path`, or fall back to defaults if it does not exist
    pub fn from_path_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse softly.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse softly.toml")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            bail!("app_id cannot be empty");
        }
        if self.app_id.contains(['/', '\\']) {
            bail!("Invalid app_id '{}': must not contain path separators", self.app_id);
        }
        if self.defaults.cycle_length == 0 {
            bail!("defaults.cycle_length must be a positive number of days");
        }
        if self.defaults.period_duration == 0 {
            bail!("defaults.period_duration must be a positive number of days");
        }
        Ok(())
    }
}
