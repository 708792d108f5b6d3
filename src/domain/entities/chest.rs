//! Chest offers - The purchasable catalog
//!
//! A chest is static reference data, not a runtime entity: opening one
//! always yields exactly one creature of the chest's rarity.

use serde::Serialize;

use crate::domain::value_objects::Rarity;

/// A purchasable chest descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChestOffer {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    pub cost: u64,
    pub xp_grant: u64,
}

impl ChestOffer {
    /// All chests on the market, cheapest first
    pub fn catalog() -> Vec<ChestOffer> {
        Rarity::ALL
            .iter()
            .map(|rarity| {
                let (id, description) = match rarity {
                    Rarity::Wooden => ("wood", "Common dragons"),
                    Rarity::Iron => ("iron", "Rare breeds"),
                    Rarity::Silver => ("silver", "Mystic kin"),
                    Rarity::Golden => ("gold", "Epic wyrms"),
                };
                Self {
                    id,
                    name: rarity.name(),
                    description,
                    rarity: *rarity,
                    cost: rarity.chest_cost(),
                    xp_grant: rarity.chest_xp(),
                }
            })
            .collect()
    }

    pub fn find(id: &str) -> Option<ChestOffer> {
        Self::catalog().into_iter().find(|chest| chest.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_values() {
        let wood = ChestOffer::find("wood").unwrap();
        assert_eq!(wood.rarity, Rarity::Wooden);
        assert_eq!(wood.cost, 100);
        assert_eq!(wood.xp_grant, 25);

        let gold = ChestOffer::find("gold").unwrap();
        assert_eq!(gold.cost, 5000);
        assert_eq!(gold.xp_grant, 1000);

        assert!(ChestOffer::find("obsidian").is_none());
        assert_eq!(ChestOffer::catalog().len(), 4);
    }
}
