//! Battle detection.
//!
//! Polls nearby living entities once per snapshot rebuild. A battle starts as
//! soon as a hostile within range targets the player or a boss is close
//! enough, and is held for a short grace period after the last sighting so the
//! state does not flicker between ticks.

use glam::DVec3;
use mdsurround_world::{CombatantKind, WorldView};
use serde::Serialize;

/// Search radius for the entity query; also the dragon's range.
const BOSS_RANGE: f64 = 256.0;
/// Range for the wither and other bosses.
const MINI_BOSS_RANGE: f64 = 128.0;
/// Ticks a battle persists after the last qualifying entity disappears.
const BATTLE_TIMER_EXPIRY: u64 = 10;

/// Coarse combat intensity for music selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BattleIntensity {
    /// No battle.
    #[default]
    None,
    /// Ordinary hostiles only.
    Skirmish,
    /// A boss is involved.
    Boss,
}

/// Tracks hostile engagement across ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BattleScanner {
    battle_timer: u64,
    in_battle: bool,
    is_boss: bool,
    is_wither: bool,
    is_dragon: bool,
}

impl BattleScanner {
    /// Scanner in the "no battle" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all battle state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Re-evaluate against the entities around `center`.
    ///
    /// `mob_range` is the radius (blocks) inside which an ordinary hostile
    /// targeting the player counts.
    pub fn update<W: WorldView + ?Sized>(&mut self, world: &W, center: DVec3, mob_range: f64) {
        let mob_range_sq = mob_range * mob_range;
        let mut in_battle = false;
        let mut is_boss = false;
        let mut is_wither = false;
        let mut is_dragon = false;

        for combatant in world.nearby_combatants(center, BOSS_RANGE) {
            let distance_sq = combatant.position.distance_squared(center);
            match combatant.kind {
                CombatantKind::Hostile => {
                    if combatant.targeting_player && distance_sq <= mob_range_sq {
                        in_battle = true;
                    }
                }
                CombatantKind::Dragon => {
                    if distance_sq <= BOSS_RANGE * BOSS_RANGE {
                        in_battle = true;
                        is_boss = true;
                        is_dragon = true;
                    }
                }
                CombatantKind::Wither => {
                    if distance_sq <= MINI_BOSS_RANGE * MINI_BOSS_RANGE {
                        in_battle = true;
                        is_boss = true;
                        is_wither = true;
                    }
                }
                CombatantKind::Boss => {
                    if distance_sq <= MINI_BOSS_RANGE * MINI_BOSS_RANGE {
                        in_battle = true;
                        is_boss = true;
                    }
                }
            }
        }

        let tick = world.total_world_time();
        if in_battle {
            self.battle_timer = tick + BATTLE_TIMER_EXPIRY;
            self.in_battle = true;
            self.is_boss = is_boss;
            self.is_wither = is_wither;
            self.is_dragon = is_dragon;
        } else if tick >= self.battle_timer {
            // Grace period over; until then the last observed state stands.
            self.in_battle = false;
            self.is_boss = false;
            self.is_wither = false;
            self.is_dragon = false;
        }
    }

    /// Whether a battle is in progress.
    pub fn in_battle(&self) -> bool {
        self.in_battle
    }

    /// Whether a boss is involved.
    pub fn is_boss(&self) -> bool {
        self.is_boss
    }

    /// Whether the wither is involved.
    pub fn is_wither(&self) -> bool {
        self.is_wither
    }

    /// Whether the ender dragon is involved.
    pub fn is_dragon(&self) -> bool {
        self.is_dragon
    }

    /// Current combat intensity.
    pub fn intensity(&self) -> BattleIntensity {
        match (self.in_battle, self.is_boss) {
            (false, _) => BattleIntensity::None,
            (true, false) => BattleIntensity::Skirmish,
            (true, true) => BattleIntensity::Boss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdsurround_testkit::FlatWorld;

    fn hostile(id: u32, x: f64, targeting_player: bool) -> mdsurround_world::Combatant {
        mdsurround_world::Combatant {
            entity_id: id,
            kind: CombatantKind::Hostile,
            position: DVec3::new(x, 64.0, 0.0),
            targeting_player,
        }
    }

    #[test]
    fn targeting_hostile_in_range_starts_battle() {
        let mut world = FlatWorld::new();
        world.combatants.push(hostile(1, 10.0, true));
        let mut scanner = BattleScanner::new();
        scanner.update(&world, DVec3::new(0.0, 64.0, 0.0), 20.0);
        assert!(scanner.in_battle());
        assert_eq!(scanner.intensity(), BattleIntensity::Skirmish);
    }

    #[test]
    fn idle_or_distant_hostiles_are_ignored() {
        let mut world = FlatWorld::new();
        world.combatants.push(hostile(1, 10.0, false));
        world.combatants.push(hostile(2, 30.0, true));
        let mut scanner = BattleScanner::new();
        scanner.update(&world, DVec3::new(0.0, 64.0, 0.0), 20.0);
        assert!(!scanner.in_battle());
    }

    #[test]
    fn dragon_is_a_boss_battle_at_long_range() {
        let mut world = FlatWorld::new();
        world.combatants.push(mdsurround_world::Combatant {
            entity_id: 9,
            kind: CombatantKind::Dragon,
            position: DVec3::new(200.0, 64.0, 0.0),
            targeting_player: false,
        });
        let mut scanner = BattleScanner::new();
        scanner.update(&world, DVec3::new(0.0, 64.0, 0.0), 20.0);
        assert!(scanner.is_dragon());
        assert!(scanner.is_boss());
        assert!(!scanner.is_wither());
        assert_eq!(scanner.intensity(), BattleIntensity::Boss);
    }

    #[test]
    fn battle_holds_through_grace_period_then_ends() {
        let mut world = FlatWorld::new();
        world.total_time = 100;
        world.combatants.push(hostile(1, 5.0, true));
        let center = DVec3::new(0.0, 64.0, 0.0);
        let mut scanner = BattleScanner::new();
        scanner.update(&world, center, 20.0);
        assert!(scanner.in_battle());

        world.combatants.clear();
        world.total_time = 105;
        scanner.update(&world, center, 20.0);
        assert!(scanner.in_battle(), "still inside the grace period");

        world.total_time = 110;
        scanner.update(&world, center, 20.0);
        assert!(!scanner.in_battle());
        assert_eq!(scanner.intensity(), BattleIntensity::None);
    }

    #[test]
    fn reset_restores_fresh_state() {
        let mut world = FlatWorld::new();
        world.combatants.push(hostile(1, 5.0, true));
        let mut scanner = BattleScanner::new();
        scanner.update(&world, DVec3::new(0.0, 64.0, 0.0), 20.0);
        scanner.reset();
        assert_eq!(scanner, BattleScanner::new());
    }
}
