//! Per-dimension properties.

use crate::view::WorldView;
use mdsurround_core::DimensionId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Properties of a dimension that weather, aurora and biome sentinels depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionInfo {
    pub id: DimensionId,
    pub name: String,
    pub sea_level: i32,
    pub sky_height: i32,
    pub cloud_height: i32,
    pub space_height: i32,
    pub has_sky: bool,
    pub has_weather: bool,
    pub has_auroras: bool,
}

impl DimensionInfo {
    /// Neutral descriptor used before the first lookup.
    pub fn none() -> Self {
        Self {
            id: DimensionId::OVERWORLD,
            name: String::new(),
            sea_level: 0,
            sky_height: 0,
            cloud_height: 0,
            space_height: 0,
            has_sky: false,
            has_weather: false,
            has_auroras: false,
        }
    }

    /// Defaults for a dimension the registry knows nothing about.
    pub fn generic(id: DimensionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sea_level: 63,
            sky_height: 256,
            cloud_height: 128,
            space_height: 256,
            has_sky: true,
            has_weather: true,
            has_auroras: false,
        }
    }

    pub fn is_none(&self) -> bool {
        self.name.is_empty()
    }
}

impl Default for DimensionInfo {
    fn default() -> Self {
        Self::none()
    }
}

/// Dimension properties keyed by [`DimensionId`].
#[derive(Debug, Clone, Default)]
pub struct DimensionRegistry {
    entries: HashMap<DimensionId, DimensionInfo>,
}

impl DimensionRegistry {
    /// Registry with the three vanilla dimensions.
    pub fn vanilla() -> Self {
        let mut registry = Self::default();
        registry.register(DimensionInfo {
            has_auroras: true,
            ..DimensionInfo::generic(DimensionId::OVERWORLD, "overworld")
        });
        registry.register(DimensionInfo {
            sea_level: 31,
            sky_height: 128,
            cloud_height: 128,
            space_height: 128,
            has_sky: false,
            has_weather: false,
            ..DimensionInfo::generic(DimensionId::NETHER, "the_nether")
        });
        registry.register(DimensionInfo {
            has_weather: false,
            ..DimensionInfo::generic(DimensionId::END, "the_end")
        });
        registry
    }

    pub fn register(&mut self, info: DimensionInfo) {
        self.entries.insert(info.id, info);
    }

    /// Properties for the world's current dimension, generic defaults if unregistered.
    pub fn data_for<W: WorldView + ?Sized>(&self, world: &W) -> DimensionInfo {
        let id = world.dimension_id();
        self.entries
            .get(&id)
            .cloned()
            .unwrap_or_else(|| DimensionInfo::generic(id, world.dimension_name()))
    }

    pub fn get(&self, id: DimensionId) -> Option<&DimensionInfo> {
        self.entries.get(&id)
    }

    /// Sea level for a dimension (63 when unregistered).
    pub fn sea_level(&self, id: DimensionId) -> i32 {
        self.entries.get(&id).map(|d| d.sea_level).unwrap_or(63)
    }

    pub fn has_auroras(&self, id: DimensionId) -> bool {
        self.entries.get(&id).is_some_and(|d| d.has_auroras)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_overworld_has_auroras() {
        let registry = DimensionRegistry::vanilla();
        assert!(registry.has_auroras(DimensionId::OVERWORLD));
        assert!(!registry.has_auroras(DimensionId::NETHER));
        assert!(!registry.has_auroras(DimensionId::END));
        assert!(!registry.has_auroras(DimensionId(42)));
    }

    #[test]
    fn none_descriptor_is_neutral() {
        let none = DimensionInfo::none();
        assert!(none.is_none());
        assert!(!none.has_auroras);
        assert_eq!(none.sea_level, 0);
    }
}
