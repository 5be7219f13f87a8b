//! Configuration model.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Description rendering settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Guide snapshot file used by the CLI.
    #[serde(default = "default_guide_file")]
    pub guide_file: PathBuf,
}

/// Description rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Credits listed per role in the short description.
    pub max_short_credits: usize,
    /// Maximum characters in the short description.
    pub short_length_limit: usize,
    /// strftime format for showing times.
    pub time_format: String,
    /// Other showings listed in the short description (at least one).
    pub max_other_showings: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            guide_file: default_guide_file(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_short_credits: 3,
            short_length_limit: 320,
            time_format: "%a %d %b %H:%M".to_string(),
            max_other_showings: 5,
        }
    }
}

fn default_guide_file() -> PathBuf {
    dirs_config_path().join("guide.json")
}

/// Get the configuration directory path.
pub fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tvguide")
}

/// Load configuration from the default location.
pub fn load_config() -> Config {
    load_config_from(&dirs_config_path().join("config.toml"))
}

/// Read and parse a configuration file.
pub fn read_config(config_path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(config_path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration from a file, falling back to defaults.
pub fn load_config_from(config_path: &Path) -> Config {
    if config_path.exists() {
        match read_config(config_path) {
            Ok(config) => return config,
            Err(e) => tracing::warn!("Ignoring config {}: {}", config_path.display(), e),
        }
    }

    Config::default()
}
