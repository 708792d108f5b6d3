//! Elements and element tiers
//!
//! Every creature belongs to one of fifteen elements. Elements are grouped
//! into four tiers; the tier only feeds the sale value of a creature, it has
//! no bearing on rarity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Elemental affinity of a creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Wind,
    Earth,
    Water,
    Verdant,
    Metal,
    Energy,
    Shadow,
    Void,
    Light,
    Ancient,
    Legendary,
    Primordial,
    Divine,
    Tyrant,
}

impl Element {
    pub const ALL: [Element; 15] = [
        Element::Fire,
        Element::Wind,
        Element::Earth,
        Element::Water,
        Element::Verdant,
        Element::Metal,
        Element::Energy,
        Element::Shadow,
        Element::Void,
        Element::Light,
        Element::Ancient,
        Element::Legendary,
        Element::Primordial,
        Element::Divine,
        Element::Tyrant,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Wind => "Wind",
            Self::Earth => "Earth",
            Self::Water => "Water",
            Self::Verdant => "Verdant",
            Self::Metal => "Metal",
            Self::Energy => "Energy",
            Self::Shadow => "Shadow",
            Self::Void => "Void",
            Self::Light => "Light",
            Self::Ancient => "Ancient",
            Self::Legendary => "Legendary",
            Self::Primordial => "Primordial",
            Self::Divine => "Divine",
            Self::Tyrant => "Tyrant",
        }
    }

    /// The tier this element belongs to
    pub fn tier(&self) -> ElementTier {
        match self {
            Self::Fire | Self::Wind | Self::Earth | Self::Water | Self::Verdant => {
                ElementTier::Tier1
            }
            Self::Metal | Self::Energy | Self::Shadow => ElementTier::Tier2,
            Self::Void | Self::Light | Self::Ancient => ElementTier::Tier3,
            Self::Legendary | Self::Primordial | Self::Divine | Self::Tyrant => {
                ElementTier::Tier4
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown element: {0}")]
pub struct ParseElementError(pub String);

impl FromStr for Element {
    type Err = ParseElementError;

    /// Case-insensitive match on the element name, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Element::ALL
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

/// Grouping of elements used by the valuation formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ElementTier {
    Tier1 = 1,
    Tier2 = 2,
    Tier3 = 3,
    Tier4 = 4,
}

const TIER_1_ELEMENTS: &[Element] = &[
    Element::Fire,
    Element::Wind,
    Element::Earth,
    Element::Water,
    Element::Verdant,
];
const TIER_2_ELEMENTS: &[Element] = &[Element::Metal, Element::Energy, Element::Shadow];
const TIER_3_ELEMENTS: &[Element] = &[Element::Void, Element::Light, Element::Ancient];
const TIER_4_ELEMENTS: &[Element] = &[
    Element::Legendary,
    Element::Primordial,
    Element::Divine,
    Element::Tyrant,
];

impl ElementTier {
    pub const ALL: [ElementTier; 4] = [
        ElementTier::Tier1,
        ElementTier::Tier2,
        ElementTier::Tier3,
        ElementTier::Tier4,
    ];

    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Elements belonging to this tier, in catalog order
    pub fn elements(&self) -> &'static [Element] {
        match self {
            Self::Tier1 => TIER_1_ELEMENTS,
            Self::Tier2 => TIER_2_ELEMENTS,
            Self::Tier3 => TIER_3_ELEMENTS,
            Self::Tier4 => TIER_4_ELEMENTS,
        }
    }
}

impl From<ElementTier> for u8 {
    fn from(tier: ElementTier) -> u8 {
        tier.index()
    }
}

impl TryFrom<u8> for ElementTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Tier1),
            2 => Ok(Self::Tier2),
            3 => Ok(Self::Tier3),
            4 => Ok(Self::Tier4),
            other => Err(format!("element tier must be between 1 and 4, got {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_element_listed_in_its_own_tier() {
        for element in Element::ALL {
            assert!(element.tier().elements().contains(&element));
        }
        let total: usize = ElementTier::ALL.iter().map(|t| t.elements().len()).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn test_parse_element() {
        assert_eq!(" tyrant ".parse::<Element>(), Ok(Element::Tyrant));
        assert_eq!("Fire".parse::<Element>(), Ok(Element::Fire));
        assert!("Lava".parse::<Element>().is_err());
    }

    #[test]
    fn test_element_tier_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&ElementTier::Tier3).unwrap(), "3");
        assert!(serde_json::from_str::<ElementTier>("5").is_err());
    }
}
