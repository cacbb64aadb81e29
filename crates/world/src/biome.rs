//! Biome descriptors and the registry that resolves host lookups into them.
//!
//! Underground, outer space and the cloud layer are not real biomes. The host
//! reports them as sentinel lookups and the registry hands back dedicated
//! descriptors whose [`BiomeKind`] says which sentinel they are.

use crate::pos::BlockPos;
use mdsurround_core::RegistryKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Height above which biome temperature starts dropping.
const TEMPERATURE_FALLOFF_START_Y: i32 = 64;

/// Rainfall above which a biome is considered humid.
const HIGH_HUMIDITY_RAINFALL: f32 = 0.85;

/// Discriminates real biomes from the registry's sentinel descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeKind {
    /// A biome the host actually generates.
    Normal,
    /// Player is below ground with no sky access.
    Underground,
    /// Player is above the dimension's space height.
    OuterSpace,
    /// Player is inside the cloud layer.
    Clouds,
    /// No lookup has happened yet, or the host named an unregistered biome.
    Unknown,
}

/// Biome descriptor with the climate values effect producers care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeInfo {
    pub key: RegistryKey,
    /// Display name.
    pub name: String,
    pub kind: BiomeKind,
    /// Base temperature on the host's float scale (0.15 is the snow line).
    pub temperature: f32,
    /// Rainfall in [0.0, 1.0].
    pub rainfall: f32,
}

impl BiomeInfo {
    /// Create a normal biome descriptor.
    pub fn new(key: RegistryKey, name: impl Into<String>, temperature: f32, rainfall: f32) -> Self {
        Self {
            key,
            name: name.into(),
            kind: BiomeKind::Normal,
            temperature,
            rainfall,
        }
    }

    fn sentinel(path: &'static str, name: &str, kind: BiomeKind, temperature: f32, rainfall: f32) -> Self {
        Self {
            key: RegistryKey::vanilla(path),
            name: name.to_string(),
            kind,
            temperature,
            rainfall,
        }
    }

    /// Temperature at a position; cools with altitude above y=64.
    pub fn temperature_at(&self, pos: BlockPos) -> f32 {
        if pos.y > TEMPERATURE_FALLOFF_START_Y {
            self.temperature - (pos.y - TEMPERATURE_FALLOFF_START_Y) as f32 * 0.05 / 30.0
        } else {
            self.temperature
        }
    }

    pub fn is_high_humidity(&self) -> bool {
        self.rainfall > HIGH_HUMIDITY_RAINFALL
    }

    pub fn is_sentinel(&self) -> bool {
        self.kind != BiomeKind::Normal
    }
}

/// What the host answered when asked which biome the player is in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BiomeLookup {
    /// A concrete biome by registry key.
    Biome(RegistryKey),
    Underground,
    OuterSpace,
    Clouds,
}

/// Vanilla biomes with their stock climate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VanillaBiome {
    IcePlains,
    IceMountains,
    Taiga,
    Plains,
    Forest,
    BirchForest,
    ExtremeHills,
    Desert,
    Savanna,
    Swampland,
    Jungle,
    Ocean,
    DeepOcean,
    Hell,
    Sky,
}

impl VanillaBiome {
    /// Every vanilla biome, in registration order.
    pub fn all() -> &'static [VanillaBiome] {
        &[
            VanillaBiome::IcePlains,
            VanillaBiome::IceMountains,
            VanillaBiome::Taiga,
            VanillaBiome::Plains,
            VanillaBiome::Forest,
            VanillaBiome::BirchForest,
            VanillaBiome::ExtremeHills,
            VanillaBiome::Desert,
            VanillaBiome::Savanna,
            VanillaBiome::Swampland,
            VanillaBiome::Jungle,
            VanillaBiome::Ocean,
            VanillaBiome::DeepOcean,
            VanillaBiome::Hell,
            VanillaBiome::Sky,
        ]
    }

    /// Registry path under the `minecraft` namespace.
    pub fn path(self) -> &'static str {
        match self {
            VanillaBiome::IcePlains => "ice_flats",
            VanillaBiome::IceMountains => "ice_mountains",
            VanillaBiome::Taiga => "taiga",
            VanillaBiome::Plains => "plains",
            VanillaBiome::Forest => "forest",
            VanillaBiome::BirchForest => "birch_forest",
            VanillaBiome::ExtremeHills => "extreme_hills",
            VanillaBiome::Desert => "desert",
            VanillaBiome::Savanna => "savanna",
            VanillaBiome::Swampland => "swampland",
            VanillaBiome::Jungle => "jungle",
            VanillaBiome::Ocean => "ocean",
            VanillaBiome::DeepOcean => "deep_ocean",
            VanillaBiome::Hell => "hell",
            VanillaBiome::Sky => "sky",
        }
    }

    pub fn key(self) -> RegistryKey {
        RegistryKey::vanilla(self.path())
    }

    /// Display name, temperature, rainfall.
    fn climate(self) -> (&'static str, f32, f32) {
        match self {
            VanillaBiome::IcePlains => ("Ice Plains", 0.0, 0.5),
            VanillaBiome::IceMountains => ("Ice Mountains", 0.0, 0.5),
            VanillaBiome::Taiga => ("Taiga", 0.25, 0.8),
            VanillaBiome::Plains => ("Plains", 0.8, 0.4),
            VanillaBiome::Forest => ("Forest", 0.7, 0.8),
            VanillaBiome::BirchForest => ("Birch Forest", 0.6, 0.6),
            VanillaBiome::ExtremeHills => ("Extreme Hills", 0.2, 0.3),
            VanillaBiome::Desert => ("Desert", 2.0, 0.0),
            VanillaBiome::Savanna => ("Savanna", 1.2, 0.0),
            VanillaBiome::Swampland => ("Swampland", 0.8, 0.9),
            VanillaBiome::Jungle => ("Jungle", 0.95, 0.9),
            VanillaBiome::Ocean => ("Ocean", 0.5, 0.5),
            VanillaBiome::DeepOcean => ("Deep Ocean", 0.5, 0.5),
            VanillaBiome::Hell => ("Hell", 2.0, 0.0),
            VanillaBiome::Sky => ("The End", 0.5, 0.5),
        }
    }

    /// Descriptor for this biome.
    pub fn info(self) -> BiomeInfo {
        let (name, temperature, rainfall) = self.climate();
        BiomeInfo::new(self.key(), name, temperature, rainfall)
    }
}

/// Registry of biome descriptors plus the four sentinels.
#[derive(Debug, Clone)]
pub struct BiomeRegistry {
    biomes: BTreeMap<RegistryKey, Arc<BiomeInfo>>,
    underground: Arc<BiomeInfo>,
    outer_space: Arc<BiomeInfo>,
    clouds: Arc<BiomeInfo>,
    unknown: Arc<BiomeInfo>,
}

impl BiomeRegistry {
    /// Registry holding only the sentinels.
    pub fn empty() -> Self {
        Self {
            biomes: BTreeMap::new(),
            underground: Arc::new(BiomeInfo::sentinel(
                "dsurround_underground",
                "Underground",
                BiomeKind::Underground,
                0.5,
                0.0,
            )),
            outer_space: Arc::new(BiomeInfo::sentinel(
                "dsurround_outerspace",
                "OuterSpace",
                BiomeKind::OuterSpace,
                0.0,
                0.0,
            )),
            clouds: Arc::new(BiomeInfo::sentinel(
                "dsurround_clouds",
                "Clouds",
                BiomeKind::Clouds,
                0.1,
                1.0,
            )),
            unknown: Arc::new(BiomeInfo::sentinel(
                "dsurround_wtf",
                "(FooBar)",
                BiomeKind::Unknown,
                0.5,
                0.5,
            )),
        }
    }

    /// Registry pre-populated with every [`VanillaBiome`].
    pub fn vanilla() -> Self {
        let mut registry = Self::empty();
        for biome in VanillaBiome::all() {
            registry.register(biome.info());
        }
        registry
    }

    /// Register (or replace) a biome descriptor.
    pub fn register(&mut self, info: BiomeInfo) {
        self.biomes.insert(info.key.clone(), Arc::new(info));
    }

    pub fn get(&self, key: &RegistryKey) -> Option<&Arc<BiomeInfo>> {
        self.biomes.get(key)
    }

    /// Number of registered (non-sentinel) biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    /// Resolve a host lookup into a descriptor; unregistered keys map to [`Self::unknown`].
    pub fn resolve(&self, lookup: &BiomeLookup) -> Arc<BiomeInfo> {
        match lookup {
            BiomeLookup::Biome(key) => match self.biomes.get(key) {
                Some(info) => Arc::clone(info),
                None => {
                    debug!(biome = %key, "Unregistered biome; using placeholder");
                    Arc::clone(&self.unknown)
                }
            },
            BiomeLookup::Underground => Arc::clone(&self.underground),
            BiomeLookup::OuterSpace => Arc::clone(&self.outer_space),
            BiomeLookup::Clouds => Arc::clone(&self.clouds),
        }
    }

    pub fn underground(&self) -> &Arc<BiomeInfo> {
        &self.underground
    }

    pub fn outer_space(&self) -> &Arc<BiomeInfo> {
        &self.outer_space
    }

    pub fn clouds(&self) -> &Arc<BiomeInfo> {
        &self.clouds
    }

    /// Placeholder used before the first lookup and for unknown biomes.
    pub fn unknown(&self) -> &Arc<BiomeInfo> {
        &self.unknown
    }
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::vanilla()
    }
}
