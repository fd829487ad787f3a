//! Settings module for persisting user preferences to disk
//!
//! This module provides a settings store that reads and writes a JSON file in
//! the XDG config directory. A missing file means default settings; command
//! line flags take precedence over anything stored here.

mod settings;

pub use settings::{ConfigError, OutputFormat, Settings, SettingsStore};
