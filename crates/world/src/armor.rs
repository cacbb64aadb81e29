use serde::{Deserialize, Serialize};

/// Equipment slots that carry armor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorSlot {
    Head,
    Chest,
    Legs,
    Feet,
}

/// Armor weight class, ordered from lightest to heaviest. Drives footstep and
/// movement sound layering.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ArmorClass {
    #[default]
    None,
    Light,
    Medium,
    Crystal,
    Heavy,
}

impl ArmorClass {
    /// Heaviest class worn on head, chest or legs.
    pub fn effective(head: ArmorClass, chest: ArmorClass, legs: ArmorClass) -> ArmorClass {
        head.max(chest).max(legs)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArmorClass::None => "none",
            ArmorClass::Light => "light",
            ArmorClass::Medium => "medium",
            ArmorClass::Crystal => "crystal",
            ArmorClass::Heavy => "heavy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_class_is_heaviest_upper_slot() {
        assert_eq!(
            ArmorClass::effective(ArmorClass::Light, ArmorClass::Heavy, ArmorClass::None),
            ArmorClass::Heavy
        );
        assert_eq!(
            ArmorClass::effective(ArmorClass::None, ArmorClass::None, ArmorClass::None),
            ArmorClass::None
        );
    }
}
