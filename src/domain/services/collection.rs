//! Collection Manager - Owned creatures and the breeding selection
//!
//! The collection is ordered most-recent-first. The selection holds at most
//! two creature ids and is never persisted.

use crate::domain::entities::Creature;
use crate::domain::errors::GameError;
use crate::domain::services::breeding;
use crate::domain::value_objects::CreatureId;

#[derive(Debug, Clone, Default)]
pub struct Collection {
    creatures: Vec<Creature>,
    selection: Vec<CreatureId>,
}

impl Collection {
    pub fn new(creatures: Vec<Creature>) -> Self {
        Self {
            creatures,
            selection: Vec::new(),
        }
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn get(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn selection(&self) -> &[CreatureId] {
        &self.selection
    }

    /// Newest first
    pub fn add(&mut self, creature: Creature) {
        self.creatures.insert(0, creature);
    }

    /// Remove a creature, dropping it from the selection as well
    pub fn remove(&mut self, id: CreatureId) -> Option<Creature> {
        let index = self.creatures.iter().position(|c| c.id == id)?;
        self.selection.retain(|selected| *selected != id);
        Some(self.creatures.remove(index))
    }

    /// Toggle a creature in the breeding selection.
    ///
    /// Selecting a second creature when both would be maximum rarity is
    /// rejected and leaves the first selection in place. Selecting while a
    /// pair is already chosen starts a new selection with only this creature.
    pub fn toggle_select(&mut self, id: CreatureId) -> Result<(), GameError> {
        let rarity = self
            .get(id)
            .map(Creature::rarity)
            .ok_or(GameError::CreatureNotFound(id))?;

        if let Some(index) = self.selection.iter().position(|selected| *selected == id) {
            self.selection.remove(index);
            return Ok(());
        }

        match self.selection.len() {
            0 => self.selection.push(id),
            1 => {
                let first = self.selection[0];
                match self.get(first).map(Creature::rarity) {
                    Some(first_rarity) if !breeding::can_pair(first_rarity, rarity) => {
                        return Err(GameError::InvalidSelection(
                            "Two maximum-rarity dragons cannot be bred".to_string(),
                        ));
                    }
                    Some(_) => self.selection.push(id),
                    None => self.selection = vec![id],
                }
            }
            _ => self.selection = vec![id],
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The two selected creatures, in selection order
    pub fn selected_pair(&self) -> Option<(&Creature, &Creature)> {
        match self.selection.as_slice() {
            [a, b] => Some((self.get(*a)?, self.get(*b)?)),
            _ => None,
        }
    }

    pub fn can_breed(&self) -> bool {
        self.selected_pair()
            .map(|(a, b)| breeding::can_pair(a.rarity(), b.rarity()))
            .unwrap_or(false)
    }

    /// Replace both parents with their offspring and clear the selection
    pub fn commit_breed(
        &mut self,
        offspring: Creature,
        parent_a: CreatureId,
        parent_b: CreatureId,
    ) -> Result<(), GameError> {
        for parent in [parent_a, parent_b] {
            if self.get(parent).is_none() {
                return Err(GameError::CreatureNotFound(parent));
            }
        }
        self.creatures
            .retain(|c| c.id != parent_a && c.id != parent_b);
        self.add(offspring);
        self.clear_selection();
        Ok(())
    }
}
