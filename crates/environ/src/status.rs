//! Live player predicates.
//!
//! These read the player entity at call time instead of the last snapshot, so
//! they stay correct between ticks. With no player every predicate is false.

use mdsurround_core::SurroundConfig;
use mdsurround_world::PlayerView;

/// Predicate view over the current player reference.
pub struct PlayerStatus<'a, P: PlayerView + ?Sized> {
    player: Option<&'a P>,
    hurt_threshold: f32,
    hunger_threshold: i32,
}

impl<'a, P: PlayerView + ?Sized> PlayerStatus<'a, P> {
    /// Bind to a player (or none) using the configured thresholds.
    pub fn new(player: Option<&'a P>, config: &SurroundConfig) -> Self {
        Self {
            player,
            hurt_threshold: config.player_hurt_threshold,
            hunger_threshold: config.player_hunger_threshold,
        }
    }

    fn check(&self, predicate: impl FnOnce(&P) -> bool) -> bool {
        self.player.is_some_and(predicate)
    }

    /// Player is in creative mode.
    pub fn is_creative(&self) -> bool {
        self.check(|p| p.is_creative())
    }

    /// Health at or below the hurt threshold (never in creative; 0 disables).
    pub fn is_hurt(&self) -> bool {
        self.hurt_threshold != 0.0
            && !self.is_creative()
            && self.check(|p| p.health() <= self.hurt_threshold)
    }

    /// Food at or below the hunger threshold (never in creative; 0 disables).
    pub fn is_hungry(&self) -> bool {
        self.hunger_threshold != 0
            && !self.is_creative()
            && self.check(|p| p.food_level() <= self.hunger_threshold)
    }

    /// Player is on fire.
    pub fn is_burning(&self) -> bool {
        self.check(|p| p.is_burning())
    }

    /// Air supply exhausted.
    pub fn is_suffocating(&self) -> bool {
        self.check(|p| p.air() <= 0)
    }

    /// Player is flying.
    pub fn is_flying(&self) -> bool {
        self.check(|p| p.is_flying())
    }

    /// Player is sprinting.
    pub fn is_sprinting(&self) -> bool {
        self.check(|p| p.is_sprinting())
    }

    /// Player is in lava.
    pub fn is_in_lava(&self) -> bool {
        self.check(|p| p.is_in_lava())
    }

    /// Player is invisible.
    pub fn is_invisible(&self) -> bool {
        self.check(|p| p.is_invisible())
    }

    /// Player has the blindness effect.
    pub fn is_blind(&self) -> bool {
        self.check(|p| p.is_blind())
    }

    /// Player is in water.
    pub fn is_in_water(&self) -> bool {
        self.check(|p| p.is_in_water())
    }

    /// Player is riding an entity.
    pub fn is_riding(&self) -> bool {
        self.check(|p| p.is_riding())
    }

    /// Player is standing on the ground.
    pub fn is_on_ground(&self) -> bool {
        self.check(|p| p.on_ground())
    }

    /// Walk distance changed since the previous tick.
    pub fn is_moving(&self) -> bool {
        self.check(|p| p.distance_walked() != p.prev_distance_walked())
    }

    /// Player is sneaking.
    pub fn is_sneaking(&self) -> bool {
        self.check(|p| p.is_sneaking())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdsurround_testkit::TestPlayer;

    #[test]
    fn no_player_means_every_predicate_is_false() {
        let config = SurroundConfig::default();
        let status = PlayerStatus::<TestPlayer>::new(None, &config);
        assert!(!status.is_hurt());
        assert!(!status.is_hungry());
        assert!(!status.is_burning());
        assert!(!status.is_suffocating());
        assert!(!status.is_moving());
        assert!(!status.is_on_ground());
    }

    #[test]
    fn hurt_and_hungry_follow_thresholds() {
        let config = SurroundConfig::default();
        let mut player = TestPlayer::new();
        player.health = 8.0;
        player.food_level = 9;
        let status = PlayerStatus::new(Some(&player), &config);
        assert!(status.is_hurt());
        assert!(!status.is_hungry());
    }

    #[test]
    fn creative_players_are_never_hurt_or_hungry() {
        let config = SurroundConfig::default();
        let mut player = TestPlayer::new();
        player.health = 1.0;
        player.food_level = 1;
        player.creative = true;
        let status = PlayerStatus::new(Some(&player), &config);
        assert!(!status.is_hurt());
        assert!(!status.is_hungry());
    }

    #[test]
    fn zero_threshold_disables_check() {
        let config = SurroundConfig {
            player_hurt_threshold: 0.0,
            player_hunger_threshold: 0,
            ..SurroundConfig::default()
        };
        let mut player = TestPlayer::new();
        player.health = 0.5;
        player.food_level = 0;
        let status = PlayerStatus::new(Some(&player), &config);
        assert!(!status.is_hurt());
        assert!(!status.is_hungry());
    }

    #[test]
    fn predicates_read_the_live_player() {
        let config = SurroundConfig::default();
        let mut player = TestPlayer::new();
        assert!(!PlayerStatus::new(Some(&player), &config).is_moving());
        player.distance_walked = 1.5;
        assert!(PlayerStatus::new(Some(&player), &config).is_moving());
        player.air = 0;
        assert!(PlayerStatus::new(Some(&player), &config).is_suffocating());
    }
}
