//! Game rule errors
//!
//! Every variant is recoverable: the session returns to idle after any of
//! them and the player may act again.

use crate::domain::value_objects::CreatureId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Creature not found: {0}")]
    CreatureNotFound(CreatureId),
    #[error("Unknown chest: {0}")]
    UnknownChest(String),
    #[error("Another action is still in progress")]
    Busy,
}
