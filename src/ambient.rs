//! Ambient sound producer driving the admission engine from the snapshot.
//!
//! Keeps one looping background track per environment under a stable
//! identity, swaps in battle music while combat lasts, and scatters short
//! spot sounds around the player.

use anyhow::{Context, Result};
use glam::DVec3;
use mdsurround_audio::{Rejection, SoundCategory, SoundEngine, SoundRequest};
use mdsurround_core::{scoped_rng, RegistryKey, SimTick};
use mdsurround_environ::{BattleIntensity, EffectHandler, EnvironmentSnapshot, TickContext};
use mdsurround_world::BiomeKind;
use rand::Rng;
use tracing::debug;

pub const AMBIENT_ID: &str = "ambient";
pub const BATTLE_ID: &str = "battle";

const SPOT_SALT: u64 = 0x5307_a1b1_e000_0001;
/// One spot sound roughly every this many ticks.
const SPOT_CHANCE: u32 = 40;
const SPOT_RANGE: f64 = 12.0;

pub struct AmbientSoundHandler {
    seed: u64,
    current_loop: Option<RegistryKey>,
    battle: BattleIntensity,
}

impl AmbientSoundHandler {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            current_loop: None,
            battle: BattleIntensity::None,
        }
    }

    /// Loop that fits where the player is standing.
    pub fn loop_for(snapshot: &EnvironmentSnapshot) -> Result<RegistryKey> {
        let biome = snapshot.player_biome();
        let name = match biome.kind {
            BiomeKind::Underground => "ambient.cave".to_string(),
            BiomeKind::OuterSpace => "ambient.space".to_string(),
            BiomeKind::Clouds => "ambient.wind".to_string(),
            BiomeKind::Unknown => "ambient.silence".to_string(),
            BiomeKind::Normal if snapshot.is_inside() => "ambient.indoors".to_string(),
            BiomeKind::Normal if snapshot.clock().is_night() => {
                format!("ambient.{}.night", biome.key.path())
            }
            BiomeKind::Normal => format!("ambient.{}", biome.key.path()),
        };
        RegistryKey::parse(&format!("dsurround:{name}"))
            .with_context(|| format!("no sound key for {name}"))
    }

    fn battle_track(intensity: BattleIntensity) -> &'static str {
        match intensity {
            BattleIntensity::Boss => "dsurround:battle.boss",
            _ => "dsurround:battle.skirmish",
        }
    }

    fn update_loop(&mut self, ctx: &TickContext<'_>, engine: &mut SoundEngine) -> Result<()> {
        let wanted = Self::loop_for(ctx.snapshot)?;
        if self.current_loop.as_ref() == Some(&wanted) && engine.is_id_playing(AMBIENT_ID) {
            return Ok(());
        }
        let request = SoundRequest::new(wanted.clone(), SoundCategory::Ambient)
            .with_id(AMBIENT_ID)
            .at(ctx.snapshot.player_origin())
            .with_volume(0.6)
            .streaming();
        match engine.admit(&request) {
            Ok(_) => {
                debug!(sound = %wanted, "Ambient loop changed");
                self.current_loop = Some(wanted);
            }
            // Retried next tick once a channel frees up.
            Err(Rejection::NoRoom { .. }) => {}
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn update_battle(&mut self, ctx: &TickContext<'_>, engine: &mut SoundEngine) -> Result<()> {
        let intensity = if ctx.config.enable_battle_music {
            ctx.snapshot.battle().intensity()
        } else {
            BattleIntensity::None
        };
        if intensity == BattleIntensity::None {
            if self.battle != BattleIntensity::None {
                engine.stop_sound(BATTLE_ID);
                self.battle = BattleIntensity::None;
            }
            return Ok(());
        }
        if intensity == self.battle && engine.is_id_playing(BATTLE_ID) {
            return Ok(());
        }
        let key = RegistryKey::parse(Self::battle_track(intensity))?;
        let request = SoundRequest::new(key, SoundCategory::Music)
            .with_id(BATTLE_ID)
            .streaming();
        if engine.play_sound(&request).is_some() {
            self.battle = intensity;
        }
        Ok(())
    }

    fn spot_sound(&self, ctx: &TickContext<'_>, engine: &mut SoundEngine) -> Result<()> {
        let snapshot = ctx.snapshot;
        if snapshot.is_underground() || snapshot.is_inside() {
            return Ok(());
        }
        let mut rng = scoped_rng(self.seed, SPOT_SALT, SimTick(snapshot.tick_counter()));
        if rng.gen_range(0..SPOT_CHANCE) != 0 {
            return Ok(());
        }
        let name = if snapshot.clock().is_night() {
            "dsurround:spot.owl"
        } else if snapshot.is_freezing() {
            "dsurround:spot.wind_gust"
        } else {
            "dsurround:spot.bird"
        };
        let offset = DVec3::new(
            rng.gen_range(-SPOT_RANGE..SPOT_RANGE),
            rng.gen_range(0.0..4.0),
            rng.gen_range(-SPOT_RANGE..SPOT_RANGE),
        );
        let request = SoundRequest::new(RegistryKey::parse(name)?, SoundCategory::Ambient)
            .at(snapshot.player_origin() + offset)
            .with_pitch(rng.gen_range(0.8..1.2));
        engine.play_sound(&request);
        Ok(())
    }
}

impl EffectHandler<SoundEngine> for AmbientSoundHandler {
    fn name(&self) -> &str {
        "ambient-sound"
    }

    fn process(&mut self, ctx: &TickContext<'_>, engine: &mut SoundEngine) -> Result<()> {
        self.update_battle(ctx, engine)?;
        self.update_loop(ctx, engine)?;
        self.spot_sound(ctx, engine)
    }

    fn on_connect(&mut self) {
        self.current_loop = None;
        self.battle = BattleIntensity::None;
    }

    fn on_disconnect(&mut self) {
        self.current_loop = None;
        self.battle = BattleIntensity::None;
    }

    fn diagnostics(&self, _ctx: &TickContext<'_>, engine: &SoundEngine, out: &mut Vec<String>) {
        let track = self
            .current_loop
            .as_ref()
            .map_or_else(|| "NONE".to_string(), ToString::to_string);
        out.push(format!(
            "Ambient: {} (playing: {})",
            track,
            engine.is_id_playing(AMBIENT_ID)
        ));
        if self.battle != BattleIntensity::None {
            out.push(format!("Battle music: {:?}", self.battle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdsurround_audio::HeadlessBackend;
    use mdsurround_core::SurroundConfig;
    use mdsurround_environ::EffectManager;
    use mdsurround_testkit::{FlatWorld, TestPlayer};
    use mdsurround_world::{BiomeLookup, Combatant, CombatantKind, Registries};

    fn session(config: SurroundConfig) -> (EffectManager<SoundEngine>, SoundEngine) {
        let engine = SoundEngine::new(Box::new(HeadlessBackend::new(Some(128))), &config);
        let mut manager = EffectManager::new(config, Registries::vanilla(0));
        manager.register(Box::new(AmbientSoundHandler::new(7)));
        manager.connect();
        (manager, engine)
    }

    #[test]
    fn loop_follows_surroundings() {
        let (mut manager, mut engine) = session(SurroundConfig::default());
        let mut world = FlatWorld::new();
        let player = TestPlayer::new();

        manager.tick(&world, &player, &mut engine);
        assert!(engine.is_id_playing(AMBIENT_ID));
        assert_eq!(
            AmbientSoundHandler::loop_for(manager.snapshot()).unwrap().to_string(),
            "dsurround:ambient.plains"
        );

        world.apparent_biome = BiomeLookup::Underground;
        manager.tick(&world, &player, &mut engine);
        assert_eq!(
            AmbientSoundHandler::loop_for(manager.snapshot()).unwrap().to_string(),
            "dsurround:ambient.cave"
        );
        assert!(engine.is_id_playing(AMBIENT_ID));
    }

    #[test]
    fn battle_music_starts_and_stops() {
        let config = SurroundConfig {
            enable_battle_music: true,
            ..SurroundConfig::default()
        };
        let (mut manager, mut engine) = session(config);
        let mut world = FlatWorld::new();
        let player = TestPlayer::new();
        world.combatants.push(Combatant {
            entity_id: 50,
            kind: CombatantKind::Hostile,
            position: player.position + DVec3::new(3.0, 0.0, 0.0),
            targeting_player: true,
        });

        manager.tick(&world, &player, &mut engine);
        assert!(manager.snapshot().battle().in_battle());
        assert!(engine.is_id_playing(BATTLE_ID));

        world.combatants.clear();
        // The scanner keeps the battle flag briefly after the last hostile leaves.
        for _ in 0..20 {
            world.advance();
            manager.tick(&world, &player, &mut engine);
            engine.update();
        }
        assert!(!manager.snapshot().battle().in_battle());
        assert!(!engine.is_id_playing(BATTLE_ID));
    }

    #[test]
    fn battle_music_respects_config() {
        let (mut manager, mut engine) = session(SurroundConfig::default());
        let mut world = FlatWorld::new();
        let player = TestPlayer::new();
        world.combatants.push(Combatant {
            entity_id: 50,
            kind: CombatantKind::Hostile,
            position: player.position,
            targeting_player: true,
        });
        manager.tick(&world, &player, &mut engine);
        assert!(!engine.is_id_playing(BATTLE_ID));
    }
}
