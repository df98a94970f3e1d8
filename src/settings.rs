//! Run configuration
//!
//! Read from a JSON file next to the binary. Every field is optional in the
//! file; missing ones take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{SettingsError, Tuning};

/// Settings for one run of the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` picks one from the clock at startup
    pub seed: Option<u64>,
    /// Stop the headless runner after this many ticks
    pub max_ticks: u64,
    /// Let the autopilot play
    pub autoplay: bool,
    /// Balance overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_ticks: 20_000,
            autoplay: true,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load and validate settings, reporting every failure
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.tuning.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if anything goes wrong
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings back out as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
