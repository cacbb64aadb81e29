use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer block coordinates in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    /// World origin; also the neutral position of a reset snapshot.
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block containing a point (each axis floored).
    pub fn containing(point: DVec3) -> Self {
        Self::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        )
    }

    /// Feet position of an entity: floor of X/Z and of the bounding-box minimum Y.
    pub fn feet(position: DVec3, bounding_box_min_y: f64) -> Self {
        Self::new(
            position.x.floor() as i32,
            bounding_box_min_y.floor() as i32,
            position.z.floor() as i32,
        )
    }

    /// Block centre as a float point.
    pub fn center(self) -> DVec3 {
        DVec3::new(
            f64::from(self.x) + 0.5,
            f64::from(self.y) + 0.5,
            f64::from(self.z) + 0.5,
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feet_floors_negative_coordinates() {
        let pos = BlockPos::feet(DVec3::new(-0.5, 70.9, 12.999), 64.2);
        assert_eq!(pos, BlockPos::new(-1, 64, 12));
    }

    #[test]
    fn containing_matches_feet_when_y_agrees() {
        let point = DVec3::new(3.7, 5.1, -8.2);
        assert_eq!(BlockPos::containing(point), BlockPos::feet(point, point.y));
    }
}
