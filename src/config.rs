//! Configuration management
//!
//! Handles loading, saving, and validating application settings.

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::EncabulatorError;
use crate::theme::ThemeChoice;
use crate::visualizer::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
use crate::worker::AnalysisSettings;

const APP_DIR: &str = "hyper-encabulator";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial window width
    pub window_width: f32,

    /// Initial window height
    pub window_height: f32,

    /// Cells per side of the quantum visualizer
    pub grid_size: usize,

    /// Theme: "dark", "light", or "system"
    pub theme: String,

    /// Timing of the analysis run
    pub analysis: AnalysisSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 800.0,
            window_height: 600.0,
            grid_size: DEFAULT_GRID_SIZE,
            theme: "dark".into(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to find config directory")?
            .join(APP_DIR);

        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from disk or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific file, writing defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = fs::read_to_string(path)
                .context("Failed to read config file")?;
            let config: Self = serde_json::from_str(&data)
                .context("Failed to parse config file")?;
            config.validate()?;
            debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            info!("Wrote default config to {}", path.display());
            Ok(config)
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(path, data)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Reject values the window or worker cannot use
    pub fn validate(&self) -> std::result::Result<(), EncabulatorError> {
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(EncabulatorError::Config(format!(
                "grid_size must be within 1..={}, got {}",
                MAX_GRID_SIZE, self.grid_size
            )));
        }
        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return Err(EncabulatorError::Config(format!(
                "window size must be positive, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        self.analysis.validate()
    }

    pub fn theme_choice(&self) -> ThemeChoice {
        ThemeChoice::from_name(&self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "grid_size": 12, "analysis": { "chatter_chance": 0.5 } }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.analysis.chatter_chance, 0.5);
        assert_eq!(config.analysis.min_step_delay_ms, 50);
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.theme = "light".into();
        config.analysis.seed = Some(1234);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme_choice(), ThemeChoice::Light);
        assert_eq!(loaded.analysis.seed, Some(1234));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "analysis": { "min_step_delay_ms": 900, "max_step_delay_ms": 10 } }"#).unwrap();
        assert!(Config::load_from(&path).is_err());

        fs::write(&path, r#"{ "grid_size": 0 }"#).unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        fs::write(&path, r#"{ "grid_size": 4294967296 }"#).unwrap();
        assert!(Config::load_from(&path).is_err());

        fs::write(&path, format!(r#"{{ "grid_size": {} }}"#, MAX_GRID_SIZE + 1)).unwrap();
        assert!(Config::load_from(&path).is_err());

        fs::write(&path, format!(r#"{{ "grid_size": {} }}"#, MAX_GRID_SIZE)).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().grid_size, MAX_GRID_SIZE);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
