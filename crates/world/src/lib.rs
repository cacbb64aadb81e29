//! Read-only world contracts and the lookup tables derived state is built from.
//!
//! Nothing in this crate mutates the host world. The host implements
//! [`WorldView`] and [`PlayerView`]; the registries turn raw host answers into
//! the descriptors effect producers consume.

mod armor;
mod biome;
mod dimension;
mod pos;
mod season;
mod time;
mod view;
mod weather;

pub use armor::*;
pub use biome::*;
pub use dimension::*;
pub use pos::*;
pub use season::*;
pub use time::*;
pub use view::*;
pub use weather::*;

/// The three lookup tables the environment snapshot reads each tick.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    /// Biome descriptors and sentinels.
    pub biomes: BiomeRegistry,
    /// Season classification.
    pub seasons: SeasonRegistry,
    /// Per-dimension properties.
    pub dimensions: DimensionRegistry,
}

impl Registries {
    /// Vanilla tables with seasons sized by `season_length_days` (0 disables).
    pub fn vanilla(season_length_days: u32) -> Self {
        Self {
            biomes: BiomeRegistry::vanilla(),
            seasons: SeasonRegistry::new(season_length_days),
            dimensions: DimensionRegistry::vanilla(),
        }
    }
}
