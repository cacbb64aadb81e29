//! Static configuration shared by every subsystem.
//!
//! Loaded once at session start from TOML. Every field has a default so a
//! partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Default location of the configuration file, relative to the game directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/surround.toml";

/// Errors raised while reading or writing [`SurroundConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file was not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Options controlling sound channel setup, battle detection and diagnostics.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SurroundConfig {
    /// Size the channel pools from the hardware source count when it exceeds 64.
    pub auto_configure_channels: bool,
    /// Normal (short, positional) channel count when not auto-configured.
    pub normal_channel_count: u32,
    /// Streaming (music/ambient loop) channel count when not auto-configured.
    pub streaming_channel_count: u32,
    /// Number of streaming buffers; 0 keeps the backend default.
    pub stream_buffer_count: u32,
    /// Streaming buffer size in KiB; 0 keeps the backend default.
    pub stream_buffer_size: u32,
    /// Emit per-sound admission decisions and gather HUD diagnostics.
    pub enable_debug_logging: bool,
    /// Include backend-reported volume/pitch in admission logs.
    pub trace_sound_volume: bool,
    /// Run the battle scanner each tick.
    pub enable_battle_music: bool,
    /// Radius (blocks) in which ordinary hostiles count toward a battle.
    pub battle_scan_radius: f64,
    /// Health at or below which the player counts as hurt; 0 disables.
    pub player_hurt_threshold: f32,
    /// Food level at or below which the player counts as hungry; 0 disables.
    pub player_hunger_threshold: i32,
    /// Allow auroras in eligible dimensions.
    pub enable_auroras: bool,
    /// Length of each season in days; 0 disables seasons.
    pub season_length_days: u32,
}

impl Default for SurroundConfig {
    fn default() -> Self {
        Self {
            auto_configure_channels: true,
            normal_channel_count: 28,
            streaming_channel_count: 4,
            stream_buffer_count: 0,
            stream_buffer_size: 0,
            enable_debug_logging: false,
            trace_sound_volume: false,
            enable_battle_music: false,
            battle_scan_radius: 20.0,
            player_hurt_threshold: 8.0,
            player_hunger_threshold: 8,
            enable_auroras: true,
            season_length_days: 0,
        }
    }
}

impl SurroundConfig {
    /// Load from [`DEFAULT_CONFIG_PATH`], falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load from an explicit path, falling back to defaults on any error.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::try_load_from_path(path) {
            Ok(cfg) => cfg,
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!("Config not found at {}. Using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("Failed to load {}: {err}. Using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Load from an explicit path, returning errors to the caller.
    pub fn try_load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Save to an explicit path, creating parent directories as needed.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = SurroundConfig::from_toml_str(
            "enable_battle_music = true\nnormal_channel_count = 40\n",
        )
        .expect("valid toml");
        assert!(cfg.enable_battle_music);
        assert_eq!(cfg.normal_channel_count, 40);
        assert_eq!(cfg.streaming_channel_count, 4);
        assert!(cfg.auto_configure_channels);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = SurroundConfig::from_toml_str("normal_channel_count = \"lots\"");
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("mdsurround_missing_config/surround.toml");
        assert_eq!(SurroundConfig::load_from_path(&path), SurroundConfig::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir().join(format!("mdsurround_cfg_{}", std::process::id()));
        let path = dir.join("surround.toml");
        let cfg = SurroundConfig {
            player_hunger_threshold: 0,
            season_length_days: 7,
            ..SurroundConfig::default()
        };
        cfg.save_to_path(&path).expect("save config");
        let loaded = SurroundConfig::try_load_from_path(&path).expect("load config");
        assert_eq!(loaded, cfg);
        let _ = fs::remove_dir_all(&dir);
    }
}
