//! Dimension identifiers.
//!
//! Hosts number their dimensions with signed integers and may register
//! dimensions beyond the three vanilla ones, so the identifier is an open
//! newtype rather than a closed enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a world dimension.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DimensionId(pub i32);

impl DimensionId {
    /// The Overworld dimension.
    pub const OVERWORLD: Self = Self(0);
    /// The Nether dimension.
    pub const NETHER: Self = Self(-1);
    /// The End dimension.
    pub const END: Self = Self(1);

    /// Raw numeric id.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Canonical name for the vanilla dimensions, `None` for anything else.
    pub const fn vanilla_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("overworld"),
            -1 => Some("the_nether"),
            1 => Some("the_end"),
            _ => None,
        }
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
