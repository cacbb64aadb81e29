//! Scripted world timelines for headless sessions.
//!
//! A scenario is a list of steps; each step overrides some world state and
//! holds it for a number of ticks. Fields left out keep the previous step's
//! value.

use glam::DVec3;
use mdsurround_core::RegistryKey;
use mdsurround_testkit::{FlatWorld, TestPlayer};
use mdsurround_world::{
    BiomeLookup, Combatant, CombatantKind, VanillaBiome, WeatherProperties, WeatherState,
};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    steps: Vec<ScenarioStep>,
}

/// Where the player is, as far as biome lookups are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surroundings {
    Open,
    Underground,
    Clouds,
    Space,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScenarioStep {
    /// Ticks to hold this step.
    pub ticks: u64,
    #[serde(default)]
    pub biome: Option<String>,
    #[serde(default)]
    pub surroundings: Option<Surroundings>,
    #[serde(default)]
    pub world_time: Option<u64>,
    #[serde(default)]
    pub rain: Option<f32>,
    #[serde(default)]
    pub thunder: Option<bool>,
    #[serde(default)]
    pub inside: Option<bool>,
    #[serde(default)]
    pub paused: Option<bool>,
    #[serde(default)]
    pub block_light: Option<i32>,
    /// Number of hostiles targeting the player.
    #[serde(default)]
    pub hostiles: Option<u32>,
    #[serde(default)]
    pub boss: Option<bool>,
    #[serde(default)]
    pub health: Option<f32>,
    #[serde(default)]
    pub creative: Option<bool>,
    #[serde(default)]
    pub walk: Option<bool>,
}

pub struct Scenario {
    steps: Vec<ScenarioStep>,
    index: usize,
    ticks_in_step: u64,
}

impl Scenario {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let file: ScenarioFile = serde_json::from_str(&contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scenario file contains no steps");
        }
        Ok(Self::new(file.steps))
    }

    pub fn new(steps: Vec<ScenarioStep>) -> Self {
        Self {
            steps,
            index: 0,
            ticks_in_step: 0,
        }
    }

    /// Plains by day, a freezing night, a skirmish, a storm, then a cave.
    pub fn builtin() -> Self {
        let step = |ticks| ScenarioStep {
            ticks,
            ..ScenarioStep::default()
        };
        Self::new(vec![
            ScenarioStep {
                biome: Some(VanillaBiome::Plains.key().to_string()),
                world_time: Some(1000),
                walk: Some(true),
                ..step(100)
            },
            ScenarioStep {
                biome: Some(VanillaBiome::IcePlains.key().to_string()),
                world_time: Some(15000),
                ..step(200)
            },
            ScenarioStep {
                hostiles: Some(3),
                health: Some(6.0),
                ..step(60)
            },
            ScenarioStep {
                hostiles: Some(0),
                biome: Some(VanillaBiome::Forest.key().to_string()),
                world_time: Some(6000),
                rain: Some(0.8),
                thunder: Some(true),
                health: Some(20.0),
                ..step(100)
            },
            ScenarioStep {
                surroundings: Some(Surroundings::Underground),
                rain: Some(0.0),
                thunder: Some(false),
                inside: Some(true),
                block_light: Some(4),
                ..step(100)
            },
            ScenarioStep {
                paused: Some(true),
                ..step(20)
            },
        ])
    }

    pub fn total_ticks(&self) -> u64 {
        self.steps.iter().map(|s| s.ticks).sum()
    }

    /// Apply the current step and advance by one tick. Returns `false` once
    /// every step has run.
    pub fn advance(&mut self, world: &mut FlatWorld, player: &mut TestPlayer) -> bool {
        while let Some(step) = self.steps.get(self.index) {
            if self.ticks_in_step < step.ticks {
                break;
            }
            self.index += 1;
            self.ticks_in_step = 0;
        }
        let Some(step) = self.steps.get(self.index) else {
            return false;
        };
        if self.ticks_in_step == 0 {
            apply(step, world, player);
        }
        self.ticks_in_step += 1;

        if !world.paused {
            world.advance();
        }
        if step.walk.unwrap_or(false) {
            player.prev_distance_walked = player.distance_walked;
            player.distance_walked += 0.2;
            let next = player.position + DVec3::new(0.2, 0.0, 0.0);
            player.teleport(next);
        } else {
            player.prev_distance_walked = player.distance_walked;
        }
        true
    }
}

fn apply(step: &ScenarioStep, world: &mut FlatWorld, player: &mut TestPlayer) {
    if let Some(biome) = &step.biome {
        match RegistryKey::parse(biome) {
            Ok(key) => {
                world.true_biome = BiomeLookup::Biome(key.clone());
                world.apparent_biome = BiomeLookup::Biome(key);
            }
            Err(err) => tracing::warn!(%err, biome = %biome, "Ignoring invalid biome in scenario"),
        }
    }
    if let Some(surroundings) = step.surroundings {
        world.apparent_biome = match surroundings {
            Surroundings::Open => world.true_biome.clone(),
            Surroundings::Underground => BiomeLookup::Underground,
            Surroundings::Clouds => BiomeLookup::Clouds,
            Surroundings::Space => BiomeLookup::OuterSpace,
        };
    }
    if let Some(time) = step.world_time {
        world.world_time = time;
    }
    if let Some(rain) = step.rain {
        world.weather = WeatherProperties {
            state: if rain > 0.0 {
                WeatherState::Precipitation
            } else {
                WeatherState::Clear
            },
            rain_strength: rain,
        };
    }
    if let Some(thunder) = step.thunder {
        if thunder && world.weather.is_raining() {
            world.weather.state = WeatherState::Thunderstorm;
        } else if !thunder && world.weather.is_thundering() {
            world.weather.state = WeatherState::Precipitation;
        }
    }
    if let Some(inside) = step.inside {
        world.inside = inside;
    }
    if let Some(paused) = step.paused {
        world.paused = paused;
    }
    if let Some(light) = step.block_light {
        world.block_light = light;
    }
    if let Some(count) = step.hostiles {
        world.combatants.retain(|c| c.kind.is_boss());
        for i in 0..count {
            world.combatants.push(Combatant {
                entity_id: 1000 + i,
                kind: CombatantKind::Hostile,
                position: player.position + DVec3::new(4.0 + f64::from(i), 0.0, 0.0),
                targeting_player: true,
            });
        }
    }
    if let Some(boss) = step.boss {
        world.combatants.retain(|c| !c.kind.is_boss());
        if boss {
            world.combatants.push(Combatant {
                entity_id: 999,
                kind: CombatantKind::Wither,
                position: player.position + DVec3::new(30.0, 10.0, 0.0),
                targeting_player: true,
            });
        }
    }
    if let Some(health) = step.health {
        player.health = health;
    }
    if let Some(creative) = step.creative {
        player.creative = creative;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_apply_in_order_and_end() {
        let mut scenario = Scenario::new(vec![
            ScenarioStep {
                ticks: 2,
                hostiles: Some(2),
                ..ScenarioStep::default()
            },
            ScenarioStep {
                ticks: 1,
                surroundings: Some(Surroundings::Underground),
                hostiles: Some(0),
                ..ScenarioStep::default()
            },
        ]);
        assert_eq!(scenario.total_ticks(), 3);
        let mut world = FlatWorld::new();
        let mut player = TestPlayer::new();

        assert!(scenario.advance(&mut world, &mut player));
        assert_eq!(world.combatants.len(), 2);
        assert!(scenario.advance(&mut world, &mut player));
        assert!(scenario.advance(&mut world, &mut player));
        assert!(world.combatants.is_empty());
        assert_eq!(world.apparent_biome, BiomeLookup::Underground);
        assert!(!scenario.advance(&mut world, &mut player));
        assert_eq!(world.total_time, 3);
    }

    #[test]
    fn scenario_json_parses_with_defaults() {
        let file: ScenarioFile = serde_json::from_str(
            r#"{"steps":[{"ticks":5,"biome":"minecraft:desert","rain":0.5,"thunder":true}]}"#,
        )
        .unwrap();
        let mut scenario = Scenario::new(file.steps);
        let mut world = FlatWorld::new();
        let mut player = TestPlayer::new();
        scenario.advance(&mut world, &mut player);
        assert!(world.weather.is_thundering());
        assert_eq!(
            world.true_biome,
            BiomeLookup::Biome(VanillaBiome::Desert.key())
        );
    }
}
