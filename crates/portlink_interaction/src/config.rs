// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interaction settings, stored as RON.

use portlink_graph::CanvasSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Current settings file format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Press-to-release distance below which a gesture counts as a click
pub const DEFAULT_CLICK_THRESHOLD: f32 = 10.0;

/// Settings errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid RON for these settings
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serializing failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the file
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },

    /// The cancel key name is not an egui key
    #[error("Unknown cancel key: {0}")]
    UnknownKey(String),
}

/// Tuning for connection dragging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Format version
    pub version: u32,
    /// Press-to-release distance (canvas units) treated as a click
    pub click_threshold: f32,
    /// Name of the key that cancels a drag, as accepted by [`egui::Key::from_name`]
    pub cancel_key: String,
    /// Canvas hit radius and compatibility rules
    pub canvas: CanvasSettings,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            cancel_key: egui::Key::Escape.name().to_owned(),
            canvas: CanvasSettings::default(),
        }
    }
}

impl InteractionConfig {
    /// Parse settings from a RON document
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: InteractionConfig = ron::from_str(source)?;

        if config.version > CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_FORMAT_VERSION,
            });
        }
        config.cancel_key()?;

        Ok(config)
    }

    /// Render settings as a RON document
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&content)?;
        tracing::debug!("Loaded interaction settings from {:?}", path);
        Ok(config)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    /// The configured cancel key
    pub fn cancel_key(&self) -> Result<egui::Key, ConfigError> {
        egui::Key::from_name(&self.cancel_key)
            .ok_or_else(|| ConfigError::UnknownKey(self.cancel_key.clone()))
    }
}
