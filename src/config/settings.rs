//! Settings store backed by a JSON file
//!
//! Provides a `SettingsStore` that loads and saves [`Settings`] at an
//! XDG-compliant location, falling back to defaults when no file exists.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schedule::DEFAULT_MAX_TRIP_DAYS;

/// File name of the settings file inside the config directory
const SETTINGS_FILE: &str = "config.json";

/// How computed schedules are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain-text schedule table followed by the summary
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Weekday table loaded for every calculation, if set
    pub lookup_path: Option<PathBuf>,
    /// Longest trip, in days, the calculator accepts
    pub max_trip_days: i64,
    /// Default output format for the `schedule` command
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lookup_path: None,
            max_trip_days: DEFAULT_MAX_TRIP_DAYS,
            output: OutputFormat::Table,
        }
    }
}

/// Errors that can occur when reading or writing settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the settings file failed
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for [`Settings`]
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    /// `max_trip_days` must be at least one day
    #[error("Invalid max_trip_days {0}: must be at least 1")]
    InvalidMaxTripDays(i64),
}

/// Reads and writes the settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    /// Full path of the settings file
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store using the XDG-compliant config directory
    ///
    /// Uses `~/.config/tripcalc/config.json` on Linux, or the equivalent path
    /// on other platforms. Returns `None` if no home directory can be found.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "tripcalc")?;
        let path = project_dirs.config_dir().join(SETTINGS_FILE);
        Some(Self { path })
    }

    /// Creates a store for an explicit settings file
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings from disk
    ///
    /// # Returns
    /// * `Ok(Settings::default())` if the file doesn't exist
    /// * `Ok(Settings)` parsed from the file otherwise
    /// * `Err(ConfigError)` if the file can't be read, parsed, or holds invalid values
    pub fn load(&self) -> Result<Settings, ConfigError> {
        if !self.path.exists() {
            log::debug!("No settings file at {}, using defaults", self.path.display());
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;

        if settings.max_trip_days < 1 {
            return Err(ConfigError::InvalidMaxTripDays(settings.max_trip_days));
        }

        log::info!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    /// Writes settings to disk, creating the config directory if needed
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json).map_err(io_error)
    }
}
