//! Player Account Aggregate - The session-scoped game state of one player
//!
//! Currency, experience and the collection change only through this
//! aggregate. Every committing method leaves the aggregate in a state that
//! can be snapshotted and persisted as a unit.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Creature;
use crate::domain::errors::GameError;
use crate::domain::services::{breeding, valuation, Collection, ProgressionLedger};
use crate::domain::value_objects::CreatureId;

/// Currency granted to a freshly registered account
pub const STARTING_CURRENCY: u64 = 500;

/// Persistable view of an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub username: String,
    pub currency: u64,
    pub experience: u64,
    pub collection: Vec<Creature>,
}

impl AccountSnapshot {
    /// Defaults for a brand new account
    pub fn fresh(username: impl Into<String>, starting_currency: u64) -> Self {
        Self {
            username: username.into(),
            currency: starting_currency,
            experience: 0,
            collection: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerAccount {
    username: String,
    ledger: ProgressionLedger,
    collection: Collection,
}

impl PlayerAccount {
    pub fn from_snapshot(snapshot: AccountSnapshot) -> Self {
        Self {
            username: snapshot.username,
            ledger: ProgressionLedger::new(snapshot.currency, snapshot.experience),
            collection: Collection::new(snapshot.collection),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn ledger(&self) -> &ProgressionLedger {
        &self.ledger
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Total collection score
    pub fn score(&self) -> u64 {
        valuation::collection_score(self.collection.creatures())
    }

    /// Debit a chest price up front; nothing changes if unaffordable
    pub fn charge(&mut self, cost: u64) -> Result<(), GameError> {
        self.ledger.spend(cost)
    }

    /// Add a chest creature and grant the chest's experience
    pub fn commit_chest(&mut self, creature: Creature, xp_grant: u64) {
        self.collection.add(creature);
        self.ledger.grant_xp(xp_grant);
    }

    /// Replace the parents with their offspring and grant breeding experience
    pub fn commit_breed(
        &mut self,
        offspring: Creature,
        parent_a: CreatureId,
        parent_b: CreatureId,
    ) -> Result<(), GameError> {
        self.collection.commit_breed(offspring, parent_a, parent_b)?;
        self.ledger.grant_xp(breeding::BREEDING_XP);
        Ok(())
    }

    /// Sell a creature, returning the amount credited
    pub fn sell(&mut self, id: CreatureId) -> Result<u64, GameError> {
        let creature = self
            .collection
            .remove(id)
            .ok_or(GameError::CreatureNotFound(id))?;
        let value = valuation::value(&creature);
        self.ledger.credit(value);
        Ok(value)
    }

    pub fn toggle_select(&mut self, id: CreatureId) -> Result<(), GameError> {
        self.collection.toggle_select(id)
    }

    pub fn clear_selection(&mut self) {
        self.collection.clear_selection();
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            username: self.username.clone(),
            currency: self.ledger.currency(),
            experience: self.ledger.experience(),
            collection: self.collection.creatures().to_vec(),
        }
    }
}
