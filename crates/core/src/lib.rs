#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod config;
pub mod dimension;
pub mod registry;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

pub use config::{ConfigError, SurroundConfig};
pub use dimension::DimensionId;
pub use registry::{RegistryKey, RegistryKeyError};

/// Client tick counter (20 TPS => 50 ms per tick).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick of a session.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Helper to derive a reproducible RNG seeded by world + tick domains.
pub fn scoped_rng(world_seed: u64, salt: u64, tick: SimTick) -> StdRng {
    let seed = world_seed ^ salt ^ tick.0;
    StdRng::seed_from_u64(seed)
}
