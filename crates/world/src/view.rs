//! Capability contracts the host implements.

use crate::armor::{ArmorClass, ArmorSlot};
use crate::biome::{BiomeInfo, BiomeLookup};
use crate::pos::BlockPos;
use crate::weather::WeatherProperties;
use glam::DVec3;
use mdsurround_core::{DimensionId, RegistryKey};
use serde::{Deserialize, Serialize};

/// Light channels tracked by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightChannel {
    Block,
    Sky,
}

/// Client-side settings that affect what is gathered and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    /// Host debug overlay (F3) is visible.
    pub show_debug_info: bool,
    pub render_distance_chunks: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            show_debug_info: false,
            render_distance_chunks: 8,
        }
    }
}

/// Classification of a nearby living entity for battle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantKind {
    Hostile,
    Wither,
    Dragon,
    /// Any other boss-class entity.
    Boss,
}

impl CombatantKind {
    pub fn is_boss(self) -> bool {
        !matches!(self, CombatantKind::Hostile)
    }
}

/// A living entity near the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Combatant {
    pub entity_id: u32,
    pub kind: CombatantKind,
    pub position: DVec3,
    /// The entity's current attack target is the local player.
    pub targeting_player: bool,
}

/// Read-only view of the client world.
///
/// Which biome counts as "underground", "space" or "clouds", and what an
/// artificial ceiling is, are decided by the implementation of
/// [`WorldView::player_biome`].
pub trait WorldView {
    fn dimension_id(&self) -> DimensionId;

    fn dimension_name(&self) -> &str;

    /// Raw light level (0-15) of one channel at a block.
    fn light_for(&self, channel: LightChannel, pos: BlockPos) -> i32;

    /// Amount currently subtracted from skylight (night, storms).
    fn skylight_subtracted(&self) -> i32;

    /// Biome the player at `position` is in. With `true_biome` set the lookup
    /// ignores anything overhead and never returns a sentinel.
    fn player_biome(&self, position: DVec3, true_biome: bool) -> BiomeLookup;

    /// Temperature of `biome` at `pos` on the host's float scale.
    fn temperature_at(&self, biome: &BiomeInfo, pos: BlockPos) -> f32 {
        biome.temperature_at(pos)
    }

    /// Area survey result: the position is enclosed.
    fn is_inside(&self, pos: BlockPos) -> bool;

    /// Simulation is paused (single-player menu open).
    fn is_paused(&self) -> bool;

    /// Cumulative day-time ticks.
    fn world_time(&self) -> u64;

    /// Ticks since the world was created; never paused or rewound.
    fn total_world_time(&self) -> u64;

    fn weather(&self) -> WeatherProperties;

    /// Living entities within `radius` blocks of `center`.
    fn nearby_combatants(&self, center: DVec3, radius: f64) -> Vec<Combatant>;

    fn client_settings(&self) -> ClientSettings {
        ClientSettings::default()
    }
}

/// Read-only view of the local player entity.
pub trait PlayerView {
    fn entity_id(&self) -> u32;

    /// Eye-independent entity position.
    fn position(&self) -> DVec3;

    /// Position at the previous tick, for render interpolation.
    fn last_tick_position(&self) -> DVec3 {
        self.position()
    }

    fn bounding_box_min_y(&self) -> f64;

    fn health(&self) -> f32;
    fn max_health(&self) -> f32;
    fn food_level(&self) -> i32;
    fn saturation(&self) -> f32;
    /// Remaining air supply; 0 or less means drowning/suffocating.
    fn air(&self) -> i32;

    fn is_creative(&self) -> bool;
    fn is_burning(&self) -> bool;
    fn is_flying(&self) -> bool;
    fn is_sprinting(&self) -> bool;
    fn is_in_lava(&self) -> bool;
    fn is_invisible(&self) -> bool;
    fn is_blind(&self) -> bool;
    fn is_in_water(&self) -> bool;
    fn is_riding(&self) -> bool;
    fn on_ground(&self) -> bool;
    fn is_sneaking(&self) -> bool;

    /// Walk distance accumulator this tick and last tick; they differ while moving.
    fn distance_walked(&self) -> f32;
    fn prev_distance_walked(&self) -> f32;

    fn armor(&self, slot: ArmorSlot) -> ArmorClass;

    /// Item key and stack size in the main hand.
    fn held_item(&self) -> Option<(RegistryKey, u32)>;
}
