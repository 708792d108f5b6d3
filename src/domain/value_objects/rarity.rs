//! Rarity tiers and their static catalog values
//!
//! Rarity governs what a chest costs, how much experience it grants, the
//! base sale value of a creature and its contribution to the collection
//! score. It also selects the element-tier drop table used when a chest is
//! opened.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::element::ElementTier;

/// Quality level of a creature or chest, totally ordered (Golden is best)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rarity {
    Wooden = 1,
    Iron = 2,
    Silver = 3,
    Golden = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rarity must be between 1 and 4, got {0}")]
pub struct InvalidRarity(pub u8);

const WOODEN_DROP_RATES: &[(ElementTier, f64)] =
    &[(ElementTier::Tier1, 0.90), (ElementTier::Tier2, 0.10)];
const IRON_DROP_RATES: &[(ElementTier, f64)] = &[
    (ElementTier::Tier1, 0.30),
    (ElementTier::Tier2, 0.60),
    (ElementTier::Tier3, 0.10),
];
const SILVER_DROP_RATES: &[(ElementTier, f64)] = &[
    (ElementTier::Tier2, 0.30),
    (ElementTier::Tier3, 0.60),
    (ElementTier::Tier4, 0.10),
];
const GOLDEN_DROP_RATES: &[(ElementTier, f64)] =
    &[(ElementTier::Tier3, 0.20), (ElementTier::Tier4, 0.80)];

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Wooden, Rarity::Iron, Rarity::Silver, Rarity::Golden];
    pub const MAX: Rarity = Rarity::Golden;

    pub fn tier(&self) -> u8 {
        *self as u8
    }

    pub fn is_max(&self) -> bool {
        *self == Self::MAX
    }

    /// One tier up, capped at the maximum
    pub fn upgraded(&self) -> Rarity {
        match self {
            Self::Wooden => Self::Iron,
            Self::Iron => Self::Silver,
            Self::Silver | Self::Golden => Self::Golden,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Wooden => "Wooden",
            Self::Iron => "Iron",
            Self::Silver => "Silver",
            Self::Golden => "Golden",
        }
    }

    /// Price of a chest of this rarity
    pub fn chest_cost(&self) -> u64 {
        match self {
            Self::Wooden => 100,
            Self::Iron => 350,
            Self::Silver => 1000,
            Self::Golden => 5000,
        }
    }

    /// Experience granted when a chest of this rarity yields a creature
    pub fn chest_xp(&self) -> u64 {
        match self {
            Self::Wooden => 25,
            Self::Iron => 100,
            Self::Silver => 350,
            Self::Golden => 1000,
        }
    }

    pub fn base_sale_value(&self) -> u64 {
        match self {
            Self::Wooden => 15,
            Self::Iron => 60,
            Self::Silver => 200,
            Self::Golden => 1000,
        }
    }

    pub fn score_value(&self) -> u64 {
        match self {
            Self::Wooden => 10,
            Self::Iron => 50,
            Self::Silver => 250,
            Self::Golden => 1500,
        }
    }

    /// Element-tier drop distribution, ascending by tier, weights summing to 1.0
    pub fn drop_rates(&self) -> &'static [(ElementTier, f64)] {
        match self {
            Self::Wooden => WOODEN_DROP_RATES,
            Self::Iron => IRON_DROP_RATES,
            Self::Silver => SILVER_DROP_RATES,
            Self::Golden => GOLDEN_DROP_RATES,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> u8 {
        rarity.tier()
    }
}

impl TryFrom<u8> for Rarity {
    type Error = InvalidRarity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Wooden),
            2 => Ok(Self::Iron),
            3 => Ok(Self::Silver),
            4 => Ok(Self::Golden),
            other => Err(InvalidRarity(other)),
        }
    }
}
