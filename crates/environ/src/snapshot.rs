//! The per-tick environment snapshot.
//!
//! One instance lives for the whole client session. [`EnvironmentSnapshot::rebuild`]
//! replaces every cached field from the world, the player and the registries;
//! nothing is patched incrementally. Only the tick counter and the battle
//! scanner carry state from one rebuild to the next.

use crate::battle::BattleScanner;
use crate::status::PlayerStatus;
use bitflags::bitflags;
use glam::DVec3;
use mdsurround_core::{DimensionId, SurroundConfig};
use mdsurround_world::{
    ArmorClass, ArmorSlot, BiomeInfo, BiomeKind, BlockPos, Clock, DimensionInfo, LightChannel,
    PlayerView, Registries, SeasonType, TemperatureRating, WorldView,
};
use std::sync::Arc;

/// True-biome temperature below which the player is freezing.
pub const FREEZING_TEMPERATURE: f32 = 0.15;

/// True-biome rainfall below which the area is dry.
pub const DRY_RAINFALL: f32 = 0.2;

bitflags! {
    /// Boolean environment conditions derived during a rebuild.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct EnvironFlags: u16 {
        /// True biome temperature below the snow line.
        const FREEZING = 1 << 0;
        /// True biome is high humidity.
        const HUMID = 1 << 1;
        /// True biome rainfall is low.
        const DRY = 1 << 2;
        /// Area survey says the player is enclosed.
        const INSIDE = 1 << 3;
        /// Apparent biome is the underground sentinel.
        const UNDERGROUND = 1 << 4;
        /// Apparent biome is the outer space sentinel.
        const IN_SPACE = 1 << 5;
        /// Apparent biome is the cloud layer sentinel.
        const IN_CLOUDS = 1 << 6;
        /// Server reported the player is inside a village.
        const IN_VILLAGE = 1 << 7;
    }
}

/// Derived world and player state, valid from one rebuild to the next.
#[derive(Debug, Clone)]
pub struct EnvironmentSnapshot {
    unknown_biome: Arc<BiomeInfo>,

    player_id: Option<u32>,
    player_origin: DVec3,
    dimension_id: DimensionId,
    dimension_name: String,
    dimension: DimensionInfo,
    biome: Arc<BiomeInfo>,
    true_biome: Arc<BiomeInfo>,
    biome_name: String,
    season: SeasonType,
    player_position: BlockPos,
    player_temperature: TemperatureRating,
    biome_temperature: TemperatureRating,
    armor_class: ArmorClass,
    foot_armor_class: ArmorClass,
    flags: EnvironFlags,
    light_level: i32,
    tick_counter: u64,
    clock: Clock,
    battle: BattleScanner,
}

impl EnvironmentSnapshot {
    /// Snapshot holding neutral defaults; `registries` supplies the placeholder biome.
    pub fn new(registries: &Registries) -> Self {
        Self::neutral(Arc::clone(registries.biomes.unknown()))
    }

    fn neutral(unknown: Arc<BiomeInfo>) -> Self {
        Self {
            player_id: None,
            player_origin: DVec3::ZERO,
            dimension_id: DimensionId::default(),
            dimension_name: String::new(),
            dimension: DimensionInfo::none(),
            biome: Arc::clone(&unknown),
            true_biome: Arc::clone(&unknown),
            biome_name: String::new(),
            season: SeasonType::None,
            player_position: BlockPos::ORIGIN,
            player_temperature: TemperatureRating::Mild,
            biome_temperature: TemperatureRating::Mild,
            armor_class: ArmorClass::None,
            foot_armor_class: ArmorClass::None,
            flags: EnvironFlags::empty(),
            light_level: 0,
            tick_counter: 0,
            clock: Clock::new(),
            battle: BattleScanner::new(),
            unknown_biome: unknown,
        }
    }

    /// Restore every field to its neutral default and start a fresh battle scanner.
    pub fn reset(&mut self) {
        *self = Self::neutral(Arc::clone(&self.unknown_biome));
    }

    /// Recompute every cached field from `world` and `player`.
    ///
    /// The in-village flag is event-fed (see [`Self::set_in_village`]) and
    /// survives a rebuild.
    pub fn rebuild<W, P>(
        &mut self,
        registries: &Registries,
        config: &SurroundConfig,
        world: &W,
        player: &P,
    ) where
        W: WorldView + ?Sized,
        P: PlayerView + ?Sized,
    {
        let origin = player.position();
        let pos = BlockPos::feet(origin, player.bounding_box_min_y());

        self.player_id = Some(player.entity_id());
        self.player_origin = origin;
        self.dimension = registries.dimensions.data_for(world);
        self.dimension_id = world.dimension_id();
        self.dimension_name = world.dimension_name().to_string();
        self.clock.update(world.world_time());
        self.player_position = pos;

        self.biome = registries.biomes.resolve(&world.player_biome(origin, false));
        self.biome_name = self.biome.name.clone();
        self.true_biome = registries.biomes.resolve(&world.player_biome(origin, true));
        self.season = registries
            .seasons
            .season_type(world, self.dimension.has_weather);
        self.player_temperature =
            registries
                .seasons
                .player_temperature(world, &self.true_biome, pos, self.season);
        self.biome_temperature = registries
            .seasons
            .biome_temperature(world, &self.true_biome, pos);

        let mut flags = self.flags & EnvironFlags::IN_VILLAGE;
        flags.set(
            EnvironFlags::FREEZING,
            world.temperature_at(&self.true_biome, pos) < FREEZING_TEMPERATURE,
        );
        flags.set(EnvironFlags::HUMID, self.true_biome.is_high_humidity());
        flags.set(EnvironFlags::DRY, self.true_biome.rainfall < DRY_RAINFALL);
        flags.set(EnvironFlags::INSIDE, world.is_inside(pos));
        flags.set(
            EnvironFlags::UNDERGROUND,
            self.biome.kind == BiomeKind::Underground,
        );
        flags.set(EnvironFlags::IN_SPACE, self.biome.kind == BiomeKind::OuterSpace);
        flags.set(EnvironFlags::IN_CLOUDS, self.biome.kind == BiomeKind::Clouds);
        self.flags = flags;

        self.armor_class = ArmorClass::effective(
            player.armor(ArmorSlot::Head),
            player.armor(ArmorSlot::Chest),
            player.armor(ArmorSlot::Legs),
        );
        self.foot_armor_class = player.armor(ArmorSlot::Feet);

        let block_light = world.light_for(LightChannel::Block, pos);
        let sky_light = world.light_for(LightChannel::Sky, pos) - world.skylight_subtracted();
        self.light_level = block_light.max(sky_light);

        if config.enable_battle_music {
            self.battle.update(world, origin, config.battle_scan_radius);
        } else {
            self.battle.reset();
        }

        if !world.is_paused() {
            self.tick_counter += 1;
        }
    }

    /// Record the server's village report.
    pub fn set_in_village(&mut self, in_village: bool) {
        self.flags.set(EnvironFlags::IN_VILLAGE, in_village);
    }

    /// Live predicates over `player` with this session's thresholds.
    pub fn status<'a, P: PlayerView + ?Sized>(
        &self,
        player: Option<&'a P>,
        config: &SurroundConfig,
    ) -> PlayerStatus<'a, P> {
        PlayerStatus::new(player, config)
    }

    /// Whether `entity_id` is the tracked player; true when no player is tracked.
    pub fn is_player(&self, entity_id: u32) -> bool {
        self.player_id.map_or(true, |id| id == entity_id)
    }

    /// Squared distance from the player to `point`; 0 when no player is tracked.
    pub fn distance_sq_to_player(&self, point: DVec3) -> f64 {
        if self.player_id.is_some() {
            self.player_origin.distance_squared(point)
        } else {
            0.0
        }
    }

    /// Entity id of the tracked player.
    pub fn player_id(&self) -> Option<u32> {
        self.player_id
    }

    /// Exact player position at the last rebuild.
    pub fn player_origin(&self) -> DVec3 {
        self.player_origin
    }

    /// Block at the player's feet.
    pub fn player_position(&self) -> BlockPos {
        self.player_position
    }

    /// Numeric dimension id.
    pub fn dimension_id(&self) -> DimensionId {
        self.dimension_id
    }

    /// Host dimension name.
    pub fn dimension_name(&self) -> &str {
        &self.dimension_name
    }

    /// Registry properties of the current dimension.
    pub fn dimension_info(&self) -> &DimensionInfo {
        &self.dimension
    }

    /// Apparent biome (may be a sentinel).
    pub fn player_biome(&self) -> &Arc<BiomeInfo> {
        &self.biome
    }

    /// Biome ignoring anything overhead.
    pub fn true_player_biome(&self) -> &Arc<BiomeInfo> {
        &self.true_biome
    }

    /// Display name of the apparent biome.
    pub fn biome_name(&self) -> &str {
        &self.biome_name
    }

    /// Current season.
    pub fn season(&self) -> SeasonType {
        self.season
    }

    /// What the player feels.
    pub fn player_temperature(&self) -> TemperatureRating {
        self.player_temperature
    }

    /// Rating of the biome at the player's position.
    pub fn biome_temperature(&self) -> TemperatureRating {
        self.biome_temperature
    }

    /// Heaviest armor worn on head, chest or legs.
    pub fn armor_class(&self) -> ArmorClass {
        self.armor_class
    }

    /// Armor worn on the feet.
    pub fn foot_armor_class(&self) -> ArmorClass {
        self.foot_armor_class
    }

    /// All derived boolean conditions.
    pub fn flags(&self) -> EnvironFlags {
        self.flags
    }

    /// True biome temperature below [`FREEZING_TEMPERATURE`].
    pub fn is_freezing(&self) -> bool {
        self.flags.contains(EnvironFlags::FREEZING)
    }

    /// True biome is humid.
    pub fn is_humid(&self) -> bool {
        self.flags.contains(EnvironFlags::HUMID)
    }

    /// True biome rainfall below [`DRY_RAINFALL`].
    pub fn is_dry(&self) -> bool {
        self.flags.contains(EnvironFlags::DRY)
    }

    /// Player is enclosed.
    pub fn is_inside(&self) -> bool {
        self.flags.contains(EnvironFlags::INSIDE)
    }

    /// Player is underground.
    pub fn is_underground(&self) -> bool {
        self.flags.contains(EnvironFlags::UNDERGROUND)
    }

    /// Player is in outer space.
    pub fn is_in_space(&self) -> bool {
        self.flags.contains(EnvironFlags::IN_SPACE)
    }

    /// Player is in the cloud layer.
    pub fn is_in_clouds(&self) -> bool {
        self.flags.contains(EnvironFlags::IN_CLOUDS)
    }

    /// Player is inside a village.
    pub fn in_village(&self) -> bool {
        self.flags.contains(EnvironFlags::IN_VILLAGE)
    }

    /// `max(block light, sky light - subtraction)` at the player's feet.
    pub fn light_level(&self) -> i32 {
        self.light_level
    }

    /// Number of unpaused rebuilds since the last reset.
    pub fn tick_counter(&self) -> u64 {
        self.tick_counter
    }

    /// World clock at the last rebuild.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Battle state.
    pub fn battle(&self) -> &BattleScanner {
        &self.battle
    }
}
