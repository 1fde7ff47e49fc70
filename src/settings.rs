//! Game settings and preferences
//!
//! Persisted as a JSON file next to the binary. Every field has a default, so
//! a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MARBLE_RADIUS, WALL_WIDTH};
use crate::renderer::Style;
use crate::tuning::Tuning;

/// Errors loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics tuning
    pub tuning: Tuning,

    /// Simulation rate of the fixed-step driver
    pub tick_rate_hz: u32,

    // === Board layout ===
    /// Marble radius in pixels (holes and the goal share it)
    pub marble_radius: f32,
    /// Full wall width in pixels
    pub wall_width: f32,
    /// Level to start on
    pub start_level: u32,

    // === Visuals ===
    pub style: Style,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            tick_rate_hz: 60,
            marble_radius: MARBLE_RADIUS,
            wall_width: WALL_WIDTH,
            start_level: 1,
            style: Style::default(),
        }
    }
}

impl Settings {
    /// Fixed timestep implied by `tick_rate_hz`
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate_hz.max(1) as f32
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.tuning.validate()?;
        if self.tick_rate_hz == 0 {
            return Err(SettingsError::Invalid("tick_rate_hz must be non-zero".into()));
        }
        if !(self.marble_radius.is_finite() && self.marble_radius > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "marble_radius {} must be positive",
                self.marble_radius
            )));
        }
        if !(self.wall_width.is_finite() && self.wall_width > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "wall_width {} must be positive",
                self.wall_width
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from disk. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save settings to disk as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
