//! Season classification and temperature ratings.

use crate::biome::BiomeInfo;
use crate::pos::BlockPos;
use crate::view::WorldView;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticks in one in-game day.
pub const TICKS_PER_DAY: u64 = 24_000;

/// Current season; `None` when seasons are disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonType {
    #[default]
    None,
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl SeasonType {
    const CYCLE: [SeasonType; 4] = [
        SeasonType::Spring,
        SeasonType::Summer,
        SeasonType::Autumn,
        SeasonType::Winter,
    ];

    /// Offset applied to felt temperature during this season.
    pub fn temperature_offset(self) -> f32 {
        match self {
            SeasonType::None | SeasonType::Spring => 0.0,
            SeasonType::Summer => 0.2,
            SeasonType::Autumn => -0.1,
            SeasonType::Winter => -0.3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeasonType::None => "none",
            SeasonType::Spring => "spring",
            SeasonType::Summer => "summer",
            SeasonType::Autumn => "autumn",
            SeasonType::Winter => "winter",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse temperature bucket used by sound and particle selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TemperatureRating {
    Icy,
    Cool,
    #[default]
    Mild,
    Warm,
    Hot,
}

impl TemperatureRating {
    pub fn from_temperature(temperature: f32) -> Self {
        if temperature < 0.15 {
            TemperatureRating::Icy
        } else if temperature < 0.5 {
            TemperatureRating::Cool
        } else if temperature < 1.0 {
            TemperatureRating::Mild
        } else if temperature < 1.5 {
            TemperatureRating::Warm
        } else {
            TemperatureRating::Hot
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureRating::Icy => "icy",
            TemperatureRating::Cool => "cool",
            TemperatureRating::Mild => "mild",
            TemperatureRating::Warm => "warm",
            TemperatureRating::Hot => "hot",
        }
    }
}

impl fmt::Display for TemperatureRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Season lookup keyed by world time.
#[derive(Debug, Clone, Default)]
pub struct SeasonRegistry {
    season_length_days: u32,
}

impl SeasonRegistry {
    /// `season_length_days == 0` disables seasons entirely.
    pub fn new(season_length_days: u32) -> Self {
        Self { season_length_days }
    }

    pub fn enabled(&self) -> bool {
        self.season_length_days > 0
    }

    /// Season for the world's current day. Dimensions without weather have no seasons.
    pub fn season_type<W: WorldView + ?Sized>(&self, world: &W, has_weather: bool) -> SeasonType {
        if !self.enabled() || !has_weather {
            return SeasonType::None;
        }
        let day = world.world_time() / TICKS_PER_DAY;
        let index = (day / u64::from(self.season_length_days)) % 4;
        SeasonType::CYCLE[index as usize]
    }

    /// Rating of what the player feels: biome temperature shifted by the season.
    pub fn player_temperature<W: WorldView + ?Sized>(
        &self,
        world: &W,
        biome: &BiomeInfo,
        pos: BlockPos,
        season: SeasonType,
    ) -> TemperatureRating {
        TemperatureRating::from_temperature(
            world.temperature_at(biome, pos) + season.temperature_offset(),
        )
    }

    /// Rating of the biome itself at a position.
    pub fn biome_temperature<W: WorldView + ?Sized>(
        &self,
        world: &W,
        biome: &BiomeInfo,
        pos: BlockPos,
    ) -> TemperatureRating {
        TemperatureRating::from_temperature(world.temperature_at(biome, pos))
    }
}
