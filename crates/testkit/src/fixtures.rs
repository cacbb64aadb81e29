//! Scripted host doubles.
//!
//! [`FlatWorld`] and [`TestPlayer`] answer every capability query from plain
//! public fields, so a test sets exactly the state it cares about and leaves
//! the rest at sensible surface-level defaults (overworld, plains, noon-ish
//! light, healthy player standing at the origin).

use glam::DVec3;
use mdsurround_core::{DimensionId, RegistryKey};
use mdsurround_world::{
    ArmorClass, ArmorSlot, BiomeLookup, BlockPos, ClientSettings, Combatant, LightChannel,
    PlayerView, VanillaBiome, WeatherProperties, WorldView,
};

/// A uniform world: every block reports the same light, biome and enclosure.
#[derive(Debug, Clone)]
pub struct FlatWorld {
    /// Dimension id.
    pub dimension_id: DimensionId,
    /// Dimension display name.
    pub dimension_name: String,
    /// Block light everywhere.
    pub block_light: i32,
    /// Raw sky light everywhere.
    pub sky_light: i32,
    /// Current skylight subtraction.
    pub skylight_subtracted: i32,
    /// Answer for apparent biome lookups.
    pub apparent_biome: BiomeLookup,
    /// Answer for true biome lookups.
    pub true_biome: BiomeLookup,
    /// Area survey result.
    pub inside: bool,
    /// Simulation paused.
    pub paused: bool,
    /// Day-time ticks.
    pub world_time: u64,
    /// Ticks since world creation.
    pub total_time: u64,
    /// Current weather.
    pub weather: WeatherProperties,
    /// Living entities present; filtered by distance on query.
    pub combatants: Vec<Combatant>,
    /// Client settings.
    pub settings: ClientSettings,
}

impl FlatWorld {
    /// Overworld plains at full sky light, clear weather, nobody around.
    pub fn new() -> Self {
        let plains = BiomeLookup::Biome(VanillaBiome::Plains.key());
        Self {
            dimension_id: DimensionId::OVERWORLD,
            dimension_name: "overworld".to_string(),
            block_light: 0,
            sky_light: 15,
            skylight_subtracted: 0,
            apparent_biome: plains.clone(),
            true_biome: plains,
            inside: false,
            paused: false,
            world_time: 6000,
            total_time: 0,
            weather: WeatherProperties::clear(),
            combatants: Vec::new(),
            settings: ClientSettings::default(),
        }
    }

    /// Advance both clocks by one tick.
    pub fn advance(&mut self) {
        self.world_time += 1;
        self.total_time += 1;
    }
}

impl Default for FlatWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldView for FlatWorld {
    fn dimension_id(&self) -> DimensionId {
        self.dimension_id
    }

    fn dimension_name(&self) -> &str {
        &self.dimension_name
    }

    fn light_for(&self, channel: LightChannel, _pos: BlockPos) -> i32 {
        match channel {
            LightChannel::Block => self.block_light,
            LightChannel::Sky => self.sky_light,
        }
    }

    fn skylight_subtracted(&self) -> i32 {
        self.skylight_subtracted
    }

    fn player_biome(&self, _position: DVec3, true_biome: bool) -> BiomeLookup {
        if true_biome {
            self.true_biome.clone()
        } else {
            self.apparent_biome.clone()
        }
    }

    fn is_inside(&self, _pos: BlockPos) -> bool {
        self.inside
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn world_time(&self) -> u64 {
        self.world_time
    }

    fn total_world_time(&self) -> u64 {
        self.total_time
    }

    fn weather(&self) -> WeatherProperties {
        self.weather
    }

    fn nearby_combatants(&self, center: DVec3, radius: f64) -> Vec<Combatant> {
        let radius_sq = radius * radius;
        self.combatants
            .iter()
            .filter(|c| c.position.distance_squared(center) <= radius_sq)
            .copied()
            .collect()
    }

    fn client_settings(&self) -> ClientSettings {
        self.settings
    }
}

/// A player whose every attribute is a public field.
#[derive(Debug, Clone)]
pub struct TestPlayer {
    /// Entity id.
    pub entity_id: u32,
    /// Current position.
    pub position: DVec3,
    /// Previous-tick position.
    pub last_position: DVec3,
    /// Bounding box bottom.
    pub bounding_box_min_y: f64,
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Food level.
    pub food_level: i32,
    /// Food saturation.
    pub saturation: f32,
    /// Air supply.
    pub air: i32,
    /// Creative mode.
    pub creative: bool,
    /// On fire.
    pub burning: bool,
    /// Flying.
    pub flying: bool,
    /// Sprinting.
    pub sprinting: bool,
    /// In lava.
    pub in_lava: bool,
    /// Invisible.
    pub invisible: bool,
    /// Blinded.
    pub blind: bool,
    /// In water.
    pub in_water: bool,
    /// Riding a mount.
    pub riding: bool,
    /// Standing on a block.
    pub on_ground: bool,
    /// Sneaking.
    pub sneaking: bool,
    /// Walk accumulator this tick.
    pub distance_walked: f32,
    /// Walk accumulator last tick.
    pub prev_distance_walked: f32,
    /// Armor in head, chest, legs, feet order.
    pub armor: [ArmorClass; 4],
    /// Main-hand item and stack size.
    pub held_item: Option<(RegistryKey, u32)>,
}

impl TestPlayer {
    /// Healthy, fed survival player standing at the origin on the surface.
    pub fn new() -> Self {
        let position = DVec3::new(0.5, 64.0, 0.5);
        Self {
            entity_id: 1,
            position,
            last_position: position,
            bounding_box_min_y: position.y,
            health: 20.0,
            max_health: 20.0,
            food_level: 20,
            saturation: 5.0,
            air: 300,
            creative: false,
            burning: false,
            flying: false,
            sprinting: false,
            in_lava: false,
            invisible: false,
            blind: false,
            in_water: false,
            riding: false,
            on_ground: true,
            sneaking: false,
            distance_walked: 0.0,
            prev_distance_walked: 0.0,
            armor: [ArmorClass::None; 4],
            held_item: None,
        }
    }

    /// Move to `position`, keeping the feet at the bottom of the box.
    pub fn teleport(&mut self, position: DVec3) {
        self.last_position = self.position;
        self.position = position;
        self.bounding_box_min_y = position.y;
    }
}

impl Default for TestPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerView for TestPlayer {
    fn entity_id(&self) -> u32 {
        self.entity_id
    }

    fn position(&self) -> DVec3 {
        self.position
    }

    fn last_tick_position(&self) -> DVec3 {
        self.last_position
    }

    fn bounding_box_min_y(&self) -> f64 {
        self.bounding_box_min_y
    }

    fn health(&self) -> f32 {
        self.health
    }

    fn max_health(&self) -> f32 {
        self.max_health
    }

    fn food_level(&self) -> i32 {
        self.food_level
    }

    fn saturation(&self) -> f32 {
        self.saturation
    }

    fn air(&self) -> i32 {
        self.air
    }

    fn is_creative(&self) -> bool {
        self.creative
    }

    fn is_burning(&self) -> bool {
        self.burning
    }

    fn is_flying(&self) -> bool {
        self.flying
    }

    fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    fn is_in_lava(&self) -> bool {
        self.in_lava
    }

    fn is_invisible(&self) -> bool {
        self.invisible
    }

    fn is_blind(&self) -> bool {
        self.blind
    }

    fn is_in_water(&self) -> bool {
        self.in_water
    }

    fn is_riding(&self) -> bool {
        self.riding
    }

    fn on_ground(&self) -> bool {
        self.on_ground
    }

    fn is_sneaking(&self) -> bool {
        self.sneaking
    }

    fn distance_walked(&self) -> f32 {
        self.distance_walked
    }

    fn prev_distance_walked(&self) -> f32 {
        self.prev_distance_walked
    }

    fn armor(&self, slot: ArmorSlot) -> ArmorClass {
        let index = match slot {
            ArmorSlot::Head => 0,
            ArmorSlot::Chest => 1,
            ArmorSlot::Legs => 2,
            ArmorSlot::Feet => 3,
        };
        self.armor[index]
    }

    fn held_item(&self) -> Option<(RegistryKey, u32)> {
        self.held_item.clone()
    }
}
