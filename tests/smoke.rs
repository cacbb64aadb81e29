use anyhow::Result;
use mdsurround_audio::{HeadlessBackend, SoundCategory, SoundEngine, SoundRequest};
use mdsurround_core::{RegistryKey, SurroundConfig};
use mdsurround_environ::{EffectHandler, EffectManager, TickContext};
use mdsurround_testkit::{FlatWorld, TestPlayer};
use mdsurround_world::Registries;

/// Keeps one wind loop playing while the player is outdoors.
struct WindLoop;

impl EffectHandler<SoundEngine> for WindLoop {
    fn name(&self) -> &str {
        "wind"
    }

    fn process(&mut self, ctx: &TickContext<'_>, sounds: &mut SoundEngine) -> Result<()> {
        if ctx.snapshot.is_inside() {
            sounds.stop_sound("wind");
        } else if !sounds.is_id_playing("wind") {
            let key = RegistryKey::parse("dsurround:ambient.wind")?;
            let request = SoundRequest::new(key, SoundCategory::Ambient)
                .with_id("wind")
                .at(ctx.snapshot.player_origin());
            let _ = sounds.admit(&request);
        }
        Ok(())
    }
}

#[test]
fn outdoor_tick_admits_one_wind_loop() {
    let config = SurroundConfig::default();
    let mut sounds = SoundEngine::new(Box::new(HeadlessBackend::new(Some(128))), &config);
    let mut manager = EffectManager::new(config, Registries::vanilla(0));
    manager.register(Box::new(WindLoop));

    let mut world = FlatWorld::new();
    let player = TestPlayer::new();
    manager.connect();
    manager.on_player_join(&world, &player);
    for _ in 0..3 {
        world.advance();
        manager.tick(&world, &player, &mut sounds);
    }

    assert_eq!(manager.snapshot().biome_name(), "Plains");
    assert_eq!(manager.snapshot().tick_counter(), 4);
    assert!(sounds.is_id_playing("wind"));
    assert_eq!(sounds.current_sound_count(), 1);
    assert_eq!(sounds.stats().admitted, 1);

    world.inside = true;
    world.advance();
    manager.tick(&world, &player, &mut sounds);
    assert!(manager.snapshot().is_inside());
    assert_eq!(sounds.current_sound_count(), 0);
}
