//! Leaderboard Service - Ranked view of all accounts

use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::outbound::{AccountStoreError, AccountStorePort};
use crate::domain::aggregates::AccountSnapshot;
use crate::domain::services::{valuation, ProgressionLedger};
use crate::domain::value_objects::Element;

const NONE_LABEL: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    pub username: String,
    pub experience: u64,
    pub level: u64,
    pub score: u64,
    pub best_creature: String,
    pub favourite_element: String,
    pub is_current: bool,
}

pub struct LeaderboardService {
    store: Arc<dyn AccountStorePort>,
    limit: usize,
}

impl LeaderboardService {
    pub fn new(store: Arc<dyn AccountStorePort>, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Top accounts by experience; `current` marks the caller's own row
    pub async fn entries(&self, current: Option<&str>) -> Result<Vec<LeaderboardEntry>, AccountStoreError> {
        let ranked = self.store.list_ranked(self.limit).await?;
        Ok(ranked
            .iter()
            .enumerate()
            .map(|(index, snapshot)| build_entry(index + 1, snapshot, current))
            .collect())
    }
}

fn build_entry(rank: usize, snapshot: &AccountSnapshot, current: Option<&str>) -> LeaderboardEntry {
    LeaderboardEntry {
        rank,
        username: snapshot.username.clone(),
        experience: snapshot.experience,
        level: ProgressionLedger::new(0, snapshot.experience).level(),
        score: valuation::collection_score(&snapshot.collection),
        best_creature: best_creature(snapshot).unwrap_or(NONE_LABEL).to_string(),
        favourite_element: favourite_element(snapshot)
            .map(|e| e.name())
            .unwrap_or(NONE_LABEL)
            .to_string(),
        is_current: current == Some(snapshot.username.as_str()),
    }
}

/// Highest rarity; on a tie the later creature wins
fn best_creature(snapshot: &AccountSnapshot) -> Option<&str> {
    snapshot
        .collection
        .iter()
        .max_by_key(|c| c.rarity())
        .map(|c| c.name.as_str())
}

/// Most frequent element; ties go to the element first seen latest
fn favourite_element(snapshot: &AccountSnapshot) -> Option<Element> {
    let mut counts: Vec<(Element, usize)> = Vec::new();
    for creature in &snapshot.collection {
        match counts.iter_mut().find(|(e, _)| *e == creature.element()) {
            Some((_, count)) => *count += 1,
            None => counts.push((creature.element(), 1)),
        }
    }
    counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(element, _)| element)
}
