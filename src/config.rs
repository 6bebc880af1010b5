//! Application configuration.
//!
//! Settings come from an optional JSON file: the path in
//! `AIRPORT_EXPLORER_CONFIG`, or `airport_explorer.json` in the working
//! directory. Every field has a default, so a missing or partial file is fine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::DEFAULT_ELEVATION_CEILING;

pub const CONFIG_ENV: &str = "AIRPORT_EXPLORER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "airport_explorer.json";
pub const DEFAULT_DATA_FILE: &str = "new_england_airports.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dataset loaded at startup and on Reload.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Initial position of the elevation slider, in feet.
    #[serde(default = "default_elevation_ceiling")]
    pub default_elevation_ceiling: f64,

    /// Upper end of the elevation slider, in feet.
    #[serde(default = "default_slider_max")]
    pub elevation_slider_max: f64,

    /// Initial window size in logical pixels.
    #[serde(default = "default_window_size")]
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            default_elevation_ceiling: default_elevation_ceiling(),
            elevation_slider_max: default_slider_max(),
            window_size: default_window_size(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_elevation_ceiling() -> f64 {
    DEFAULT_ELEVATION_CEILING
}

fn default_slider_max() -> f64 {
    3000.0
}

fn default_window_size() -> [f32; 2] {
    [1200.0, 900.0]
}

impl AppConfig {
    /// Parse a config file. Fails on unreadable files and invalid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config.validated())
    }

    /// Load `explicit` (from `--config` or `AIRPORT_EXPLORER_CONFIG`), or
    /// `airport_explorer.json` when none was given, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            if explicit.is_some() {
                log::warn!("Config file {} does not exist, using defaults", path.display());
            }
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    /// Keep the slider range non-negative and the default ceiling inside it.
    fn validated(mut self) -> Self {
        if self.elevation_slider_max.is_nan() || self.elevation_slider_max <= 0.0 {
            log::warn!(
                "elevation_slider_max must be positive, got {}",
                self.elevation_slider_max
            );
            self.elevation_slider_max = default_slider_max();
        }
        self.default_elevation_ceiling = self
            .default_elevation_ceiling
            .clamp(0.0, self.elevation_slider_max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data_path, PathBuf::from("new_england_airports.csv"));
        assert_eq!(config.default_elevation_ceiling, 2000.0);
        assert_eq!(config.elevation_slider_max, 3000.0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "data_path": "data/ne.parquet" }"#).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/ne.parquet"));
        assert_eq!(config.default_elevation_ceiling, 2000.0);
        assert_eq!(config.window_size, [1200.0, 900.0]);
    }

    #[test]
    fn test_from_file_clamps_ceiling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("airport_explorer.json");
        std::fs::write(
            &path,
            r#"{ "default_elevation_ceiling": 5000, "elevation_slider_max": 4000 }"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.elevation_slider_max, 4000.0);
        assert_eq!(config.default_elevation_ceiling, 4000.0);
    }

    #[test]
    fn test_from_file_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("airport_explorer.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, r#"{ "data_path": "ne.json", "window_size": [800, 600] }"#).unwrap();

        let config = AppConfig::load(Some(&path));
        assert_eq!(config.data_path, PathBuf::from("ne.json"));
        assert_eq!(config.window_size, [800.0, 600.0]);
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            AppConfig::load(Some(&dir.path().join("absent.json"))),
            AppConfig::default()
        );

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, "[1, 2").unwrap();
        assert_eq!(AppConfig::load(Some(&invalid)), AppConfig::default());
    }
}
