//! Value objects - Immutable objects defined by their attributes

mod element;
mod ids;
mod rarity;

pub use element::{Element, ElementTier, ParseElementError};
pub use ids::*;
pub use rarity::{InvalidRarity, Rarity};
