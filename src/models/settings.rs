//! Persisted player settings.
//!
//! Settings are stored as `settings.toml` next to the executable. Loading
//! falls back to defaults when the file is missing or malformed, saving
//! rewrites the whole file.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const SETTINGS_PATH: &str = "settings.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsState {
    /// Master volume multiplier (0.0 to 1.0). Timing points scale it per
    /// section; the product is what gets pushed to the audio player.
    pub master_volume: f64,
    /// Base scroll speed multiplier before BPM scaling.
    pub speed_base: f64,
    /// Number of playable columns.
    pub key_count: usize,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            master_volume: 0.5,
            speed_base: 1.0,
            key_count: 4,
        }
    }
}

impl SettingsState {
    /// Loads settings from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_PATH))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                log::warn!("SETTINGS: Malformed {}: {}, using defaults", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Writes current settings to disk.
    pub fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SessionError::config(e.to_string()))?;
        fs::write(SETTINGS_PATH, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = SettingsState::load_from(Path::new("does_not_exist.toml"));
        assert_eq!(settings.key_count, 4);
        assert_eq!(settings.master_volume, 0.5);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut settings = SettingsState::default();
        settings.master_volume = 0.8;
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: SettingsState = toml::from_str(&text).unwrap();
        assert_eq!(back.master_volume, 0.8);
    }
}
