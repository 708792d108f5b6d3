use serde::{Deserialize, Serialize};

use crate::domain::aggregates::PlayerAccount;
use crate::domain::entities::Creature;
use crate::domain::services::valuation;
use crate::domain::value_objects::{CreatureId, SessionId};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequestDto {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CreatureDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub rarity: u8,
    pub rarity_name: String,
    pub element: String,
    pub element_tier: u8,
    pub value: u64,
    pub score: u64,
    pub is_new: bool,
}

impl From<&Creature> for CreatureDto {
    fn from(c: &Creature) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            description: c.description.clone(),
            tags: c.tags.clone(),
            rarity: c.rarity().tier(),
            rarity_name: c.rarity().name().to_string(),
            element: c.element().name().to_string(),
            element_tier: c.element_tier().index(),
            value: valuation::value(c),
            score: valuation::score(c),
            is_new: c.is_new,
        }
    }
}

/// Everything the client renders for a logged-in player
#[derive(Debug, Serialize)]
pub struct AccountViewDto {
    pub username: String,
    pub currency: u64,
    pub experience: u64,
    pub level: u64,
    pub level_progress: f64,
    pub score: u64,
    pub collection: Vec<CreatureDto>,
    pub selection: Vec<String>,
    pub can_breed: bool,
}

impl From<&PlayerAccount> for AccountViewDto {
    fn from(account: &PlayerAccount) -> Self {
        let ledger = account.ledger();
        let collection = account.collection();
        Self {
            username: account.username().to_string(),
            currency: ledger.currency(),
            experience: ledger.experience(),
            level: ledger.level(),
            level_progress: ledger.level_progress(),
            score: account.score(),
            collection: collection.creatures().iter().map(CreatureDto::from).collect(),
            selection: collection.selection().iter().map(CreatureId::to_string).collect(),
            can_breed: collection.can_breed(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponseDto {
    pub session_id: String,
    pub account: AccountViewDto,
}

impl SessionResponseDto {
    pub fn new(session_id: SessionId, account: &PlayerAccount) -> Self {
        Self {
            session_id: session_id.to_string(),
            account: AccountViewDto::from(account),
        }
    }
}

/// Result of a chest opening or a breeding
#[derive(Debug, Serialize)]
pub struct AcquisitionResponseDto {
    pub creature: CreatureDto,
    pub account: AccountViewDto,
}

#[derive(Debug, Serialize)]
pub struct SaleResponseDto {
    pub credited: u64,
    pub account: AccountViewDto,
}
