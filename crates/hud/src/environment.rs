//! Environment state lines.

use anyhow::Result;
use mdsurround_environ::{EffectHandler, TickContext};

/// Snapshot, weather and player lines for the debug overlay.
pub fn environment_lines(ctx: &TickContext<'_>) -> Vec<String> {
    let snapshot = ctx.snapshot;
    let status = ctx.status();
    let player = ctx.player;
    let weather = ctx.world.weather();
    let pos = snapshot.player_position();
    let biome = snapshot.player_biome();
    let true_biome = snapshot.true_player_biome();

    let mut player_line = format!(
        "Player: Temp {}; health {:.1}/{:.1}; food {}; saturation {:.1}",
        snapshot.player_temperature(),
        player.health(),
        player.max_health(),
        player.food_level(),
        player.saturation()
    );
    if status.is_hurt() {
        player_line.push_str(" isHurt");
    }
    if status.is_hungry() {
        player_line.push_str(" isHungry");
    }
    player_line.push_str(&format!(
        " pos: ({},{},{}) light: {}",
        pos.x,
        pos.y,
        pos.z,
        snapshot.light_level()
    ));

    vec![
        format!(
            "Dim: {}/{}",
            snapshot.dimension_id(),
            snapshot.dimension_name()
        ),
        format!(
            "Biome: {}; Temp {}/{:.2} rainfall: {:.2}",
            snapshot.biome_name(),
            snapshot.biome_temperature(),
            ctx.world.temperature_at(biome, pos),
            biome.rainfall
        ),
        format!(
            "{} Temp: {}/{:.2}",
            weather.diagnostic(),
            snapshot.player_temperature(),
            ctx.world.temperature_at(true_biome, pos)
        ),
        format!(
            "Season: {}{}{}",
            snapshot.season(),
            if snapshot.clock().is_night() {
                " night"
            } else {
                " day"
            },
            if snapshot.is_inside() {
                " inside"
            } else {
                " outside"
            }
        ),
        player_line,
        format!("Village: {}", snapshot.in_village()),
        format!("Clock: {}", snapshot.clock()),
        format!(
            "Armor: {} / feet {}; Battle: {:?}",
            snapshot.armor_class().as_str(),
            snapshot.foot_armor_class().as_str(),
            snapshot.battle().intensity()
        ),
    ]
}

/// Contributes [`environment_lines`] during the diagnostics gather.
#[derive(Debug, Default)]
pub struct EnvironmentDiagnostics;

impl<S> EffectHandler<S> for EnvironmentDiagnostics {
    fn name(&self) -> &str {
        "environment-diagnostics"
    }

    fn process(&mut self, _ctx: &TickContext<'_>, _services: &mut S) -> Result<()> {
        Ok(())
    }

    fn diagnostics(&self, ctx: &TickContext<'_>, _services: &S, out: &mut Vec<String>) {
        out.extend(environment_lines(ctx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdsurround_core::SurroundConfig;
    use mdsurround_environ::EnvironmentSnapshot;
    use mdsurround_testkit::{FlatWorld, TestPlayer};
    use mdsurround_world::Registries;

    #[test]
    fn lines_describe_snapshot_and_player() {
        let registries = Registries::vanilla(0);
        let config = SurroundConfig::default();
        let mut world = FlatWorld::new();
        world.block_light = 7;
        world.sky_light = 0;
        world.inside = true;
        world.world_time = 18000;
        let mut player = TestPlayer::new();
        player.health = 5.0;

        let mut snapshot = EnvironmentSnapshot::new(&registries);
        snapshot.rebuild(&registries, &config, &world, &player);
        let ctx = TickContext {
            snapshot: &snapshot,
            world: &world,
            player: &player,
            config: &config,
            registries: &registries,
        };

        let lines = environment_lines(&ctx);
        assert_eq!(lines[0], "Dim: 0/overworld");
        assert!(lines[1].starts_with("Biome: Plains; Temp "));
        assert!(lines[2].starts_with("Weather: not raining Temp: "));
        assert_eq!(lines[3], "Season: none night inside");
        assert!(lines[4].contains(" isHurt"));
        assert!(!lines[4].contains("isHungry"));
        assert!(lines[4].ends_with("pos: (0,64,0) light: 7"));
        assert_eq!(lines[5], "Village: false");
    }
}
