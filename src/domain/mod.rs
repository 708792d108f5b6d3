//! Domain layer - Core game rules with no external dependencies
//!
//! This layer contains:
//! - Entities: Creature, ChestOffer
//! - Value Objects: Rarity, Element, ElementTier, identifiers
//! - Aggregates: PlayerAccount aggregate root
//! - Domain Services: Tier resolution, breeding, valuation, progression,
//!   collection management
//! - Errors: the recoverable game error taxonomy

pub mod aggregates;
pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
