//! # Configuration Management Module
//!
//! Persistent application settings stored in platform-appropriate locations.
//! Handles loading, saving, and providing defaults for configuration options.
//!
//! ## Settings
//! - `max_smoothed_points`: Upper bound on points kept in the rate chart
//! - `lookback_override`: Replace the event's ETA lookback window
//! - `chart_width` / `chart_height`: SVG chart size in pixels
//! - `render_charts`: Write chart files at all
//!
//! Event-specific settings (titles, units, time zone, lookback) travel in the
//! snapshot document instead; see `raid_data::EventConfig`.
//!
//! ## Storage Location
//! - macOS: ~/Library/Application Support/raid-eta/config.toml
//! - Linux: ~/.config/raid-eta/config.toml
//! - Windows: %APPDATA%\raid-eta\config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_smoothed_points: usize,
    pub lookback_override: Option<usize>,
    pub chart_width: u32,
    pub chart_height: u32,
    pub render_charts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_smoothed_points: 500,
            lookback_override: None,
            chart_width: 1000,
            chart_height: 500,
            render_charts: true,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("raid-eta")
            .join("config.toml")
    }

    /// Load config from the default location, creating it if missing
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, or create default if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = toml::from_str(&contents)?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, writing defaults", path.display());
                let config = Self::default();
                config.save_to(path)?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::ReadFailed(e)),
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::WriteFailed)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string).map_err(ConfigError::WriteFailed)?;

        Ok(())
    }

    /// Lookback to use for an event, honouring the override
    pub fn effective_lookback(&self, event_lookback: usize) -> usize {
        self.lookback_override.unwrap_or(event_lookback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_smoothed_points, 500);
        assert_eq!(config.lookback_override, None);
        assert!(config.render_charts);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            lookback_override: Some(12),
            render_charts: false,
            ..Config::default()
        };

        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        assert!(toml_str.contains("lookback_override = 12"));
        assert!(toml_str.contains("render_charts = false"));
    }

    #[test]
    fn test_config_deserialization_fills_defaults() {
        let toml_str = r#"
            max_smoothed_points = 200
        "#;

        let config: Config = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(config.max_smoothed_points, 200);
        assert_eq!(config.chart_width, 1000);
        assert!(config.render_charts);
    }

    #[test]
    fn test_config_load_creates_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).expect("Failed to load config");
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_config_round_trip_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            max_smoothed_points: 42,
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_config_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_smoothed_points = \"lots\"").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_effective_lookback() {
        let mut config = Config::default();
        assert_eq!(config.effective_lookback(30), 30);
        config.lookback_override = Some(5);
        assert_eq!(config.effective_lookback(30), 5);
    }
}
