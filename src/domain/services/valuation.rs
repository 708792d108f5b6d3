//! Valuation Engine - Sale value and collection score

use crate::domain::entities::Creature;
use crate::domain::value_objects::{Element, ElementTier};

/// 100 for tier 1, plus 50 per tier above
pub fn element_tier_value(tier: ElementTier) -> u64 {
    100 + (u64::from(tier.index()) - 1) * 50
}

pub fn element_value(element: Element) -> u64 {
    element_tier_value(element.tier())
}

/// Currency credited when the creature is sold
pub fn value(creature: &Creature) -> u64 {
    creature.rarity().base_sale_value() + element_value(creature.element())
}

/// Rarity-only strength used for ranking collections
pub fn score(creature: &Creature) -> u64 {
    creature.rarity().score_value()
}

pub fn collection_score(creatures: &[Creature]) -> u64 {
    creatures.iter().map(score).sum()
}
