//! Property tests for snapshot reset
//!
//! Whatever sequence of rebuilds and village reports came before, a reset
//! snapshot must read exactly like a freshly constructed one.

use glam::DVec3;
use mdsurround_core::{DimensionId, SurroundConfig};
use mdsurround_environ::{BattleScanner, EnvironFlags, EnvironmentSnapshot};
use mdsurround_testkit::{FlatWorld, TestPlayer};
use mdsurround_world::{
    ArmorClass, BiomeKind, BiomeLookup, BlockPos, Clock, Combatant, CombatantKind, Registries,
    SeasonType, TemperatureRating, VanillaBiome,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Step {
    dimension: i32,
    biome: usize,
    overhead: u8,
    world_time: u64,
    block_light: i32,
    skylight_subtracted: i32,
    inside: bool,
    paused: bool,
    position: (f64, f64, f64),
    armor: [u8; 4],
    hostiles: u8,
    boss: Option<u8>,
    village: Option<bool>,
}

fn step() -> impl Strategy<Value = Step> {
    (
        (
            -1i32..3,
            0usize..VanillaBiome::all().len(),
            0u8..4,
            0u64..200_000,
            0i32..16,
            0i32..16,
            any::<bool>(),
            any::<bool>(),
        ),
        (
            (-500.0f64..500.0, 0.0f64..256.0, -500.0f64..500.0),
            prop::array::uniform4(0u8..5),
            0u8..6,
            prop::option::of(0u8..3),
            prop::option::of(any::<bool>()),
        ),
    )
        .prop_map(
            |(
                (dimension, biome, overhead, world_time, block_light, skylight_subtracted, inside, paused),
                (position, armor, hostiles, boss, village),
            )| Step {
                dimension,
                biome,
                overhead,
                world_time,
                block_light,
                skylight_subtracted,
                inside,
                paused,
                position,
                armor,
                hostiles,
                boss,
                village,
            },
        )
}

fn armor(class: u8) -> ArmorClass {
    match class {
        1 => ArmorClass::Light,
        2 => ArmorClass::Medium,
        3 => ArmorClass::Crystal,
        4 => ArmorClass::Heavy,
        _ => ArmorClass::None,
    }
}

fn apply(step: &Step, world: &mut FlatWorld, player: &mut TestPlayer) {
    let biome = BiomeLookup::Biome(VanillaBiome::all()[step.biome].key());
    world.dimension_id = DimensionId(step.dimension);
    world.true_biome = biome.clone();
    world.apparent_biome = match step.overhead {
        1 => BiomeLookup::Underground,
        2 => BiomeLookup::OuterSpace,
        3 => BiomeLookup::Clouds,
        _ => biome,
    };
    world.world_time = step.world_time;
    world.total_time += 1;
    world.block_light = step.block_light;
    world.skylight_subtracted = step.skylight_subtracted;
    world.inside = step.inside;
    world.paused = step.paused;

    let (x, y, z) = step.position;
    player.teleport(DVec3::new(x, y, z));
    player.armor = step.armor.map(armor);

    world.combatants.clear();
    for i in 0..step.hostiles {
        world.combatants.push(Combatant {
            entity_id: 100 + u32::from(i),
            kind: CombatantKind::Hostile,
            position: player.position + DVec3::new(f64::from(i), 0.0, 2.0),
            targeting_player: i % 2 == 0,
        });
    }
    if let Some(boss) = step.boss {
        let kind = match boss {
            0 => CombatantKind::Wither,
            1 => CombatantKind::Dragon,
            _ => CombatantKind::Boss,
        };
        world.combatants.push(Combatant {
            entity_id: 99,
            kind,
            position: player.position + DVec3::new(30.0, 0.0, 0.0),
            targeting_player: false,
        });
    }
}

proptest! {
    /// Property: reset after any rebuild sequence equals a fresh snapshot
    #[test]
    fn reset_matches_fresh_snapshot(
        battle_music in any::<bool>(),
        season_length in 0u32..4,
        steps in prop::collection::vec(step(), 1..30),
    ) {
        let registries = Registries::vanilla(7);
        let config = SurroundConfig {
            enable_battle_music: battle_music,
            season_length_days: season_length,
            ..SurroundConfig::default()
        };
        let mut world = FlatWorld::new();
        let mut player = TestPlayer::new();
        let mut snapshot = EnvironmentSnapshot::new(&registries);

        for step in &steps {
            apply(step, &mut world, &mut player);
            snapshot.rebuild(&registries, &config, &world, &player);
            if let Some(village) = step.village {
                snapshot.set_in_village(village);
            }
        }
        prop_assert_eq!(snapshot.player_id(), Some(player.entity_id));

        snapshot.reset();
        let fresh = EnvironmentSnapshot::new(&registries);

        prop_assert_eq!(snapshot.player_id(), None);
        prop_assert_eq!(snapshot.player_origin(), DVec3::ZERO);
        prop_assert_eq!(snapshot.player_position(), BlockPos::ORIGIN);
        prop_assert_eq!(snapshot.dimension_id(), DimensionId::OVERWORLD);
        prop_assert_eq!(snapshot.dimension_name(), "");
        prop_assert!(snapshot.dimension_info().is_none());
        prop_assert_eq!(snapshot.player_biome().kind, BiomeKind::Unknown);
        prop_assert_eq!(snapshot.true_player_biome().kind, BiomeKind::Unknown);
        prop_assert_eq!(&snapshot.player_biome().name, &fresh.player_biome().name);
        prop_assert_eq!(snapshot.biome_name(), "");
        prop_assert_eq!(snapshot.season(), SeasonType::None);
        prop_assert_eq!(snapshot.player_temperature(), TemperatureRating::Mild);
        prop_assert_eq!(snapshot.biome_temperature(), TemperatureRating::Mild);
        prop_assert_eq!(snapshot.armor_class(), ArmorClass::None);
        prop_assert_eq!(snapshot.foot_armor_class(), ArmorClass::None);
        prop_assert_eq!(snapshot.flags(), EnvironFlags::empty());
        prop_assert!(!snapshot.in_village());
        prop_assert_eq!(snapshot.light_level(), 0);
        prop_assert_eq!(snapshot.tick_counter(), 0);
        prop_assert_eq!(snapshot.clock(), &Clock::new());
        prop_assert_eq!(snapshot.battle(), &BattleScanner::new());
        prop_assert!(snapshot.is_player(player.entity_id + 1));
        prop_assert_eq!(snapshot.distance_sq_to_player(DVec3::new(3.0, 4.0, 0.0)), 0.0);
    }
}
