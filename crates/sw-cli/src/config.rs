//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::style::{ColorMode, Theme};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the sleep log.
    pub data_file: PathBuf,
    /// When to colour the output.
    #[serde(default)]
    pub color: ColorMode,
    /// Colours and glyphs of the report.
    #[serde(default)]
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("sleeping.data"),
            color: ColorMode::default(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SLEPTWHEN_*, nested keys split on __)
        figment = figment.merge(Env::prefixed("SLEPTWHEN_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for sleptwhen.
///
/// On Linux: `~/.config/sleptwhen`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sleptwhen"))
}
