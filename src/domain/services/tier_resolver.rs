//! Tier Resolver - Element selection for chest openings
//!
//! A chest's rarity picks an element tier from its drop table, then an
//! element uniformly from that tier.

use rand::Rng;

use crate::domain::services::weighted::pick_weighted;
use crate::domain::value_objects::{Element, ElementTier, Rarity};

/// Map a uniform draw in `[0, 1)` to an element tier using the rarity's drop table
pub fn resolve_element_tier(rarity: Rarity, draw: f64) -> ElementTier {
    pick_weighted(rarity.drop_rates(), draw).unwrap_or(ElementTier::Tier1)
}

/// Roll an element for a chest of the given rarity
pub fn resolve_element<R: Rng + ?Sized>(rarity: Rarity, rng: &mut R) -> Element {
    let draw: f64 = rng.gen();
    let tier = resolve_element_tier(rarity, draw);
    let elements = tier.elements();
    let element = elements[rng.gen_range(0..elements.len())];
    tracing::debug!(%rarity, draw, tier = tier.index(), %element, "Resolved chest element");
    element
}
