use serde::Serialize;

use crate::domain::entities::ChestOffer;
use crate::domain::value_objects::{ElementTier, Rarity};

#[derive(Debug, Serialize)]
pub struct DropRateDto {
    pub element_tier: u8,
    pub weight: f64,
}

#[derive(Debug, Serialize)]
pub struct ChestOfferDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: u8,
    pub cost: u64,
    pub xp_grant: u64,
    pub drop_rates: Vec<DropRateDto>,
}

impl From<ChestOffer> for ChestOfferDto {
    fn from(chest: ChestOffer) -> Self {
        Self {
            id: chest.id.to_string(),
            name: chest.name.to_string(),
            description: chest.description.to_string(),
            rarity: chest.rarity.tier(),
            cost: chest.cost,
            xp_grant: chest.xp_grant,
            drop_rates: chest
                .rarity
                .drop_rates()
                .iter()
                .map(|(tier, weight)| DropRateDto {
                    element_tier: tier.index(),
                    weight: *weight,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ElementTierDto {
    pub tier: u8,
    pub elements: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogDto {
    pub chests: Vec<ChestOfferDto>,
    pub element_tiers: Vec<ElementTierDto>,
    pub max_rarity: u8,
}

impl CatalogDto {
    pub fn build() -> Self {
        Self {
            chests: ChestOffer::catalog().into_iter().map(ChestOfferDto::from).collect(),
            element_tiers: ElementTier::ALL
                .iter()
                .map(|tier| ElementTierDto {
                    tier: tier.index(),
                    elements: tier.elements().iter().map(|e| e.name().to_string()).collect(),
                })
                .collect(),
            max_rarity: Rarity::MAX.tier(),
        }
    }
}
