//! Breeding rules
//!
//! Offspring rarity is a pure function of the parents' rarities. The
//! offspring's element is not decided here; the content generator picks it.

use crate::domain::value_objects::Rarity;

/// Experience granted for every successful breeding
pub const BREEDING_XP: u64 = 50;

/// Two maximum-rarity creatures can never be paired
pub fn can_pair(a: Rarity, b: Rarity) -> bool {
    !(a.is_max() && b.is_max())
}

/// Equal parents upgrade one tier (capped), unequal parents inherit the higher tier
pub fn offspring_rarity(a: Rarity, b: Rarity) -> Rarity {
    if a == b {
        a.upgraded()
    } else {
        a.max(b)
    }
}
