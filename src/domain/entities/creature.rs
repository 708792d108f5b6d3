//! Creature entity - A dragon minted from a chest or bred from two parents
//!
//! Rarity and element are fixed together at creation and never change. The
//! flavor text (name, description, tags) is whatever the content generator
//! produced; the rules never inspect it.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CreatureId, Element, ElementTier, Rarity};

/// A collectible dragon owned by a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    rarity: Rarity,
    element: Element,
    /// Display-only marker for creatures acquired during the current session
    #[serde(skip)]
    pub is_new: bool,
}

impl Creature {
    pub fn new(name: impl Into<String>, rarity: Rarity, element: Element) -> Self {
        Self {
            id: CreatureId::new(),
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            rarity,
            element,
            is_new: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn newly_acquired(mut self) -> Self {
        self.is_new = true;
        self
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn element_tier(&self) -> ElementTier {
        self.element.tier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_creation() {
        let creature = Creature::new("Emberwing", Rarity::Iron, Element::Metal)
            .with_description("Forged in the heart of a dying star")
            .with_tags(vec!["Scales".to_string(), "Breath".to_string()]);

        assert_eq!(creature.rarity(), Rarity::Iron);
        assert_eq!(creature.element_tier(), ElementTier::Tier2);
        assert_eq!(creature.tags.len(), 2);
        assert!(!creature.is_new);
    }

    #[test]
    fn test_new_flag_is_not_persisted() {
        let creature = Creature::new("Mossback", Rarity::Wooden, Element::Verdant).newly_acquired();
        let json = serde_json::to_string(&creature).unwrap();
        assert!(!json.contains("is_new"));

        let restored: Creature = serde_json::from_str(&json).unwrap();
        assert!(!restored.is_new);
        assert_eq!(restored.id, creature.id);
        assert_eq!(restored.element(), Element::Verdant);
    }
}
