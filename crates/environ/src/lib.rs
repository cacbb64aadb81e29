#![warn(missing_docs)]
//! Per-tick environment state and the dispatcher that feeds it to effect producers.
//!
//! # Architecture
//!
//! - [`EnvironmentSnapshot`] - derived world/player state, rebuilt once per tick
//! - [`PlayerStatus`] - live player predicates, never cached
//! - [`BattleScanner`] - combat state machine owned by the snapshot
//! - [`EffectManager`] - owns the snapshot and an ordered list of [`EffectHandler`]s

mod battle;
mod manager;
mod snapshot;
mod status;

pub use battle::{BattleIntensity, BattleScanner};
pub use manager::{EffectHandler, EffectManager, TickContext};
pub use snapshot::{EnvironFlags, EnvironmentSnapshot};
pub use status::PlayerStatus;
