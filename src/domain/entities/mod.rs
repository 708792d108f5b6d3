//! Domain entities - Core business objects with identity

mod chest;
mod creature;

pub use chest::ChestOffer;
pub use creature::Creature;
