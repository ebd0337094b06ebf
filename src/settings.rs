//! Game settings and balance tunables
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

/// Failure to read a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player weapon stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    /// Minimum time between two shots of the same cannon
    pub cannon_cooldown_ms: u32,
    /// Cooldown while the rate-boost item is active
    pub rapid_cooldown_ms: u32,
    /// Projectile speed (pixels per tick)
    pub projectile_speed: f32,
    /// Max radius of a player explosion before item scaling
    pub explosion_max_radius: f32,
    /// Radius growth per tick
    pub explosion_growth_rate: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            cannon_cooldown_ms: 500,
            rapid_cooldown_ms: 100,
            projectile_speed: 8.0,
            explosion_max_radius: 50.0,
            explosion_growth_rate: 1.5,
        }
    }
}

impl PlayerStats {
    /// Cooldown to apply right now
    pub fn cooldown_ms(&self, rate_boost_active: bool) -> u32 {
        if rate_boost_active {
            self.rapid_cooldown_ms
        } else {
            self.cannon_cooldown_ms
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Waves ===
    /// Index of the first predefined wave played after a successful load
    pub start_wave_index: usize,
    /// Chance (percent) that a spawn becomes a special enemy while any remain
    pub special_spawn_percent: u32,

    // === Items ===
    /// Chance per tick (per mille) that an item appears
    pub item_spawn_per_mille: u32,
    /// Duration of an item effect once collected
    pub item_duration_ms: u32,
    /// Player explosion radius multiplier while area boost is active
    pub area_boost_factor: f32,

    // === Player ===
    pub player: PlayerStats,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,

            start_wave_index: 2,
            special_spawn_percent: 40,

            item_spawn_per_mille: 5,
            item_duration_ms: 10_000,
            area_boost_factor: 3.0,

            player: PlayerStats::default(),
        }
    }
}

impl Settings {
    /// Settings for a specific viewport, everything else default
    pub fn with_viewport(width: f32, height: f32) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..Self::default()
        }
    }

    /// Parse settings from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Read settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json_str(r#"{ "viewport_width": 1280.0, "player": { "projectile_speed": 10.0 } }"#)
                .unwrap();
        assert_eq!(settings.viewport_width, 1280.0);
        assert_eq!(settings.viewport_height, DEFAULT_VIEWPORT_HEIGHT);
        assert_eq!(settings.player.projectile_speed, 10.0);
        assert_eq!(settings.player.cannon_cooldown_ms, 500);
        assert_eq!(settings.start_wave_index, 2);
    }

    #[test]
    fn test_cooldown_switches_with_rate_boost() {
        let stats = PlayerStats::default();
        assert_eq!(stats.cooldown_ms(false), 500);
        assert_eq!(stats.cooldown_ms(true), 100);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/definitely/not/here/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
