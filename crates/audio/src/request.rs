//! Sound requests and categories.

use glam::DVec3;
use mdsurround_core::RegistryKey;
use mdsurround_world::BlockPos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mixer category a sound is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SoundCategory {
    #[default]
    Master,
    Music,
    Record,
    Weather,
    Block,
    Hostile,
    Neutral,
    Player,
    Ambient,
    Voice,
}

impl SoundCategory {
    /// Lowercase name as used in logs and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            SoundCategory::Master => "master",
            SoundCategory::Music => "music",
            SoundCategory::Record => "record",
            SoundCategory::Weather => "weather",
            SoundCategory::Block => "block",
            SoundCategory::Hostile => "hostile",
            SoundCategory::Neutral => "neutral",
            SoundCategory::Player => "player",
            SoundCategory::Ambient => "ambient",
            SoundCategory::Voice => "voice",
        }
    }
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One playback attempt.
///
/// An empty `id` makes the request fire-and-forget: it cannot be deduped or
/// stopped by identity later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundRequest {
    /// Sound event key.
    pub sound: RegistryKey,
    pub category: SoundCategory,
    /// World position the sound plays at.
    pub position: DVec3,
    pub volume: f32,
    pub pitch: f32,
    /// Stable identity; empty means none.
    pub id: String,
    /// Ticks to wait before the sound starts.
    pub delay_ticks: u32,
    /// Long-running loop that belongs on a streaming channel.
    pub streaming: bool,
}

impl SoundRequest {
    /// Unit volume and pitch at the origin, no identity.
    pub fn new(sound: RegistryKey, category: SoundCategory) -> Self {
        Self {
            sound,
            category,
            position: DVec3::ZERO,
            volume: 1.0,
            pitch: 1.0,
            id: String::new(),
            delay_ticks: 0,
            streaming: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn at(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    /// Center of `pos`.
    pub fn at_block(self, pos: BlockPos) -> Self {
        self.at(pos.center())
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn delayed(mut self, ticks: u32) -> Self {
        self.delay_ticks = ticks;
        self
    }

    pub fn streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

impl fmt::Display for SoundRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, v:{:.2}, p:{:.2}, x:{:.1}, y:{:.1}, z:{:.1}",
            self.sound,
            self.category,
            self.volume,
            self.pitch,
            self.position.x,
            self.position.y,
            self.position.z
        )?;
        if self.has_id() {
            write!(f, ", id:{}", self.id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_identity_only_when_set() {
        let key = RegistryKey::parse("dsurround:wind").unwrap();
        let anon = SoundRequest::new(key.clone(), SoundCategory::Ambient);
        assert!(!anon.has_id());
        assert_eq!(
            anon.to_string(),
            "dsurround:wind, ambient, v:1.00, p:1.00, x:0.0, y:0.0, z:0.0"
        );

        let named = anon.with_id("wind-1").at_block(BlockPos::new(1, 2, 3));
        assert!(named.to_string().ends_with(", x:1.5, y:2.5, z:3.5, id:wind-1"));
    }
}
