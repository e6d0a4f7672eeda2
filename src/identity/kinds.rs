//! Enumerated identity values; unrecognised numbers are kept, not rejected

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum Profession {
    Guardian,
    Warrior,
    Engineer,
    Ranger,
    Thief,
    Elementalist,
    Mesmer,
    Necromancer,
    Revenant,
    Unknown(u32),
}

impl From<u32> for Profession {
    fn from(value: u32) -> Self {
        match value {
            1 => Profession::Guardian,
            2 => Profession::Warrior,
            3 => Profession::Engineer,
            4 => Profession::Ranger,
            5 => Profession::Thief,
            6 => Profession::Elementalist,
            7 => Profession::Mesmer,
            8 => Profession::Necromancer,
            9 => Profession::Revenant,
            other => Profession::Unknown(other),
        }
    }
}

impl From<Profession> for u32 {
    fn from(profession: Profession) -> Self {
        match profession {
            Profession::Guardian => 1,
            Profession::Warrior => 2,
            Profession::Engineer => 3,
            Profession::Ranger => 4,
            Profession::Thief => 5,
            Profession::Elementalist => 6,
            Profession::Mesmer => 7,
            Profession::Necromancer => 8,
            Profession::Revenant => 9,
            Profession::Unknown(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum Race {
    Asura,
    Charr,
    Human,
    Norn,
    Sylvari,
    Unknown(u32),
}

impl From<u32> for Race {
    fn from(value: u32) -> Self {
        match value {
            0 => Race::Asura,
            1 => Race::Charr,
            2 => Race::Human,
            3 => Race::Norn,
            4 => Race::Sylvari,
            other => Race::Unknown(other),
        }
    }
}

impl From<Race> for u32 {
    fn from(race: Race) -> Self {
        match race {
            Race::Asura => 0,
            Race::Charr => 1,
            Race::Human => 2,
            Race::Norn => 3,
            Race::Sylvari => 4,
            Race::Unknown(other) => other,
        }
    }
}

/// Interface size setting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum UiSize {
    Small,
    #[default]
    Normal,
    Large,
    Larger,
    Unknown(u32),
}

impl From<u32> for UiSize {
    fn from(value: u32) -> Self {
        match value {
            0 => UiSize::Small,
            1 => UiSize::Normal,
            2 => UiSize::Large,
            3 => UiSize::Larger,
            other => UiSize::Unknown(other),
        }
    }
}

impl From<UiSize> for u32 {
    fn from(size: UiSize) -> Self {
        match size {
            UiSize::Small => 0,
            UiSize::Normal => 1,
            UiSize::Large => 2,
            UiSize::Larger => 3,
            UiSize::Unknown(other) => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_values_are_kept() {
        assert_eq!(Profession::from(42), Profession::Unknown(42));
        assert_eq!(u32::from(Profession::Unknown(42)), 42);
        assert_eq!(Race::from(9), Race::Unknown(9));
        assert_eq!(UiSize::from(7), UiSize::Unknown(7));
    }

    #[test]
    fn test_known_values() {
        assert_eq!(Profession::from(9), Profession::Revenant);
        assert_eq!(u32::from(Profession::Mesmer), 7);
        assert_eq!(Race::from(4), Race::Sylvari);
        assert_eq!(UiSize::default(), UiSize::Normal);
    }
}
