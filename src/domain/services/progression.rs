//! Progression Ledger - Currency and experience

use serde::Serialize;

use crate::domain::errors::GameError;

pub const XP_PER_LEVEL: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProgressionLedger {
    currency: u64,
    experience: u64,
}

impl ProgressionLedger {
    pub fn new(currency: u64, experience: u64) -> Self {
        Self {
            currency,
            experience,
        }
    }

    pub fn currency(&self) -> u64 {
        self.currency
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.currency >= amount
    }

    /// Debit the whole amount or nothing
    pub fn spend(&mut self, amount: u64) -> Result<(), GameError> {
        if !self.can_afford(amount) {
            return Err(GameError::InsufficientFunds {
                needed: amount,
                available: self.currency,
            });
        }
        self.currency -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.currency = self.currency.saturating_add(amount);
    }

    pub fn grant_xp(&mut self, amount: u64) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Levels start at 1, one level per 1000 XP, unbounded
    pub fn level(&self) -> u64 {
        self.experience / XP_PER_LEVEL + 1
    }

    /// Fraction of the current level completed, in `[0, 1)`
    pub fn level_progress(&self) -> f64 {
        (self.experience % XP_PER_LEVEL) as f64 / XP_PER_LEVEL as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overspend_rejected_without_partial_debit() {
        let mut ledger = ProgressionLedger::new(100, 0);
        let err = ledger.spend(150).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientFunds {
                needed: 150,
                available: 100
            }
        );
        assert_eq!(ledger.currency(), 100);

        ledger.spend(100).unwrap();
        assert_eq!(ledger.currency(), 0);
    }

    #[test]
    fn test_credit_and_xp() {
        let mut ledger = ProgressionLedger::default();
        ledger.credit(210);
        ledger.grant_xp(25);
        ledger.grant_xp(0);
        assert_eq!(ledger.currency(), 210);
        assert_eq!(ledger.experience(), 25);
    }

    #[test]
    fn test_levels() {
        assert_eq!(ProgressionLedger::new(0, 0).level(), 1);
        assert_eq!(ProgressionLedger::new(0, 999).level(), 1);
        assert_eq!(ProgressionLedger::new(0, 1000).level(), 2);

        let ledger = ProgressionLedger::new(0, 2500);
        assert_eq!(ledger.level(), 3);
        assert!((ledger.level_progress() - 0.5).abs() < f64::EPSILON);
        assert_eq!(ProgressionLedger::new(0, 1000).level_progress(), 0.0);
    }
}
