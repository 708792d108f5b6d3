//! Game Service - Chest, breeding, sale and selection flows
//!
//! Every operation works on an explicit [`PlayerAccount`] handed in by the
//! caller, who is responsible for serializing access to it. Each committed
//! change is followed by a snapshot on the [`PersistenceQueue`].
//!
//! Chest and breeding flows wait for the content generator and for a
//! presentation floor concurrently, then hold for the reveal delay before
//! committing. The result is never revealed before the floor has elapsed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::application::ports::outbound::ContentGeneratorPort;
use crate::application::services::persistence_service::PersistenceQueue;
use crate::domain::aggregates::PlayerAccount;
use crate::domain::entities::{ChestOffer, Creature};
use crate::domain::errors::GameError;
use crate::domain::services::{breeding, tier_resolver};
use crate::domain::value_objects::CreatureId;

/// Minimum pacing of generation flows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Results are revealed no sooner than this after the flow starts
    pub presentation_floor: Duration,
    /// Hold between reveal and commit
    pub reveal_delay: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            presentation_floor: Duration::from_millis(2000),
            reveal_delay: Duration::from_millis(1000),
        }
    }
}

impl PacingConfig {
    pub fn immediate() -> Self {
        Self {
            presentation_floor: Duration::ZERO,
            reveal_delay: Duration::ZERO,
        }
    }
}

pub struct GameService {
    generator: Arc<dyn ContentGeneratorPort>,
    persistence: PersistenceQueue,
    pacing: PacingConfig,
}

impl GameService {
    pub fn new(
        generator: Arc<dyn ContentGeneratorPort>,
        persistence: PersistenceQueue,
        pacing: PacingConfig,
    ) -> Self {
        Self {
            generator,
            persistence,
            pacing,
        }
    }

    /// Run `generation` alongside the presentation floor, then hold for the reveal
    async fn paced<F: Future>(&self, generation: F) -> F::Output {
        let (output, _) = tokio::join!(generation, tokio::time::sleep(self.pacing.presentation_floor));
        output
    }

    fn persist(&self, account: &PlayerAccount) {
        self.persistence.enqueue(account.snapshot());
    }

    /// Buy and open a chest.
    ///
    /// The price is debited before generation starts and is kept even if
    /// generation fails.
    #[instrument(skip(self, account), fields(username = %account.username()))]
    pub async fn open_chest(
        &self,
        account: &mut PlayerAccount,
        chest_id: &str,
    ) -> Result<Creature, GameError> {
        let chest =
            ChestOffer::find(chest_id).ok_or_else(|| GameError::UnknownChest(chest_id.to_string()))?;

        if let Err(e) = account.charge(chest.cost) {
            warn!(chest = chest.id, error = %e, "Chest purchase rejected");
            return Err(e);
        }
        self.persist(account);

        let element = {
            let mut rng = rand::thread_rng();
            tier_resolver::resolve_element(chest.rarity, &mut rng)
        };

        let content = self
            .paced(self.generator.generate(chest.rarity, element))
            .await
            .map_err(|e| {
                warn!(chest = chest.id, %element, error = %e, "Chest generation failed, cost not refunded");
                GameError::GenerationFailed(e.to_string())
            })?;

        tokio::time::sleep(self.pacing.reveal_delay).await;

        let creature = Creature::new(content.name, chest.rarity, element)
            .with_description(content.description)
            .with_tags(content.tags)
            .newly_acquired();
        account.commit_chest(creature.clone(), chest.xp_grant);
        self.persist(account);

        info!(
            chest = chest.id,
            creature_id = %creature.id,
            rarity = %creature.rarity(),
            %element,
            "Chest opened"
        );
        Ok(creature)
    }

    /// Breed the two selected creatures.
    ///
    /// Nothing changes on failure: parents stay, no experience is granted.
    #[instrument(skip(self, account), fields(username = %account.username()))]
    pub async fn breed(&self, account: &mut PlayerAccount) -> Result<Creature, GameError> {
        let (parent_a, parent_b) = account
            .collection()
            .selected_pair()
            .map(|(a, b)| (a.clone(), b.clone()))
            .ok_or_else(|| GameError::InvalidSelection("Select two dragons to breed".to_string()))?;

        if !breeding::can_pair(parent_a.rarity(), parent_b.rarity()) {
            return Err(GameError::InvalidSelection(
                "Two maximum-rarity dragons cannot be bred".to_string(),
            ));
        }

        let target = breeding::offspring_rarity(parent_a.rarity(), parent_b.rarity());

        let generated = self
            .paced(self.generator.generate_offspring(target, &parent_a, &parent_b))
            .await
            .map_err(|e| {
                warn!(error = %e, "Breeding generation failed");
                GameError::GenerationFailed(e.to_string())
            })?;

        tokio::time::sleep(self.pacing.reveal_delay).await;

        let offspring = Creature::new(generated.content.name, target, generated.element)
            .with_description(generated.content.description)
            .with_tags(generated.content.tags)
            .newly_acquired();
        account.commit_breed(offspring.clone(), parent_a.id, parent_b.id)?;
        self.persist(account);

        info!(
            offspring_id = %offspring.id,
            rarity = %target,
            element = %offspring.element(),
            consumed = ?[parent_a.id, parent_b.id],
            "Dragons bred"
        );
        Ok(offspring)
    }

    /// Sell a creature, returning the credited amount
    #[instrument(skip(self, account), fields(username = %account.username()))]
    pub fn sell(&self, account: &mut PlayerAccount, id: CreatureId) -> Result<u64, GameError> {
        let value = account.sell(id)?;
        self.persist(account);
        info!(creature_id = %id, value, "Dragon sold");
        Ok(value)
    }

    pub fn toggle_select(&self, account: &mut PlayerAccount, id: CreatureId) -> Result<(), GameError> {
        account.toggle_select(id).map_err(|e| {
            warn!(creature_id = %id, error = %e, "Selection rejected");
            e
        })
    }

    pub fn clear_selection(&self, account: &mut PlayerAccount) {
        account.clear_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{
        AccountStorePort, GeneratedContent, GeneratedOffspring, GenerationError,
    };
    use crate::domain::aggregates::AccountSnapshot;
    use crate::domain::value_objects::{Element, Rarity};
    use crate::infrastructure::persistence::InMemoryAccountRepository;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Instant;

    struct MockGenerator {
        fail: bool,
        offspring_element: Element,
        offspring_calls: Mutex<Vec<Rarity>>,
    }

    impl MockGenerator {
        fn ok() -> Self {
            Self {
                fail: false,
                offspring_element: Element::Light,
                offspring_calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok()
            }
        }
    }

    #[async_trait]
    impl ContentGeneratorPort for MockGenerator {
        async fn generate(
            &self,
            _rarity: Rarity,
            element: Element,
        ) -> Result<GeneratedContent, GenerationError> {
            if self.fail {
                return Err(GenerationError::Llm("model offline".to_string()));
            }
            Ok(GeneratedContent {
                name: format!("{} Hatchling", element),
                description: "Fresh from the chest".to_string(),
                tags: vec!["Wings".to_string()],
            })
        }

        async fn generate_offspring(
            &self,
            target_rarity: Rarity,
            _parent_a: &Creature,
            _parent_b: &Creature,
        ) -> Result<GeneratedOffspring, GenerationError> {
            self.offspring_calls.lock().unwrap().push(target_rarity);
            if self.fail {
                return Err(GenerationError::Parse("garbled".to_string()));
            }
            Ok(GeneratedOffspring {
                content: GeneratedContent {
                    name: "Hybrid".to_string(),
                    description: "Child of two".to_string(),
                    tags: vec![],
                },
                element: self.offspring_element,
            })
        }
    }

    struct Fixture {
        service: GameService,
        store: Arc<InMemoryAccountRepository>,
        queue: PersistenceQueue,
        generator: Arc<MockGenerator>,
    }

    async fn fixture(generator: MockGenerator, pacing: PacingConfig) -> Fixture {
        let store = Arc::new(InMemoryAccountRepository::new(500));
        store.create("ember", "pw").await.unwrap();
        let (queue, _worker) = PersistenceQueue::spawn(store.clone());
        let generator = Arc::new(generator);
        let service = GameService::new(generator.clone(), queue.clone(), pacing);
        Fixture {
            service,
            store,
            queue,
            generator,
        }
    }

    fn account(currency: u64, creatures: Vec<Creature>) -> PlayerAccount {
        PlayerAccount::from_snapshot(AccountSnapshot {
            username: "ember".to_string(),
            currency,
            experience: 0,
            collection: creatures,
        })
    }

    #[tokio::test]
    async fn test_open_chest_success() {
        let fx = fixture(MockGenerator::ok(), PacingConfig::immediate()).await;
        let mut player = account(500, vec![]);

        let creature = fx.service.open_chest(&mut player, "wood").await.unwrap();

        assert_eq!(creature.rarity(), Rarity::Wooden);
        assert!(creature.is_new);
        assert_eq!(player.ledger().currency(), 400);
        assert_eq!(player.ledger().experience(), 25);
        assert_eq!(player.collection().len(), 1);

        fx.queue.flush().await;
        let saved = fx.store.load("ember", "pw").await.unwrap();
        assert_eq!(saved.currency, 400);
        assert_eq!(saved.collection.len(), 1);
    }

    #[tokio::test]
    async fn test_open_chest_failure_keeps_cost() {
        let fx = fixture(MockGenerator::failing(), PacingConfig::immediate()).await;
        let mut player = account(500, vec![]);

        let err = fx.service.open_chest(&mut player, "wood").await.unwrap_err();

        assert!(matches!(err, GameError::GenerationFailed(_)));
        assert_eq!(player.ledger().currency(), 400);
        assert_eq!(player.ledger().experience(), 0);
        assert!(player.collection().is_empty());

        fx.queue.flush().await;
        assert_eq!(fx.store.load("ember", "pw").await.unwrap().currency, 400);
    }

    #[tokio::test]
    async fn test_open_chest_insufficient_funds() {
        let fx = fixture(MockGenerator::ok(), PacingConfig::immediate()).await;
        let mut player = account(300, vec![]);

        let err = fx.service.open_chest(&mut player, "iron").await.unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientFunds {
                needed: 350,
                available: 300
            }
        );
        assert_eq!(player.ledger().currency(), 300);

        let err = fx.service.open_chest(&mut player, "diamond").await.unwrap_err();
        assert_eq!(err, GameError::UnknownChest("diamond".to_string()));
    }

    #[tokio::test]
    async fn test_presentation_floor_is_respected() {
        let pacing = PacingConfig {
            presentation_floor: Duration::from_millis(60),
            reveal_delay: Duration::from_millis(20),
        };
        let fx = fixture(MockGenerator::ok(), pacing).await;
        let mut player = account(500, vec![]);

        let started = Instant::now();
        fx.service.open_chest(&mut player, "wood").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn test_breed_same_rarity_upgrades() {
        let fx = fixture(MockGenerator::ok(), PacingConfig::immediate()).await;
        let a = Creature::new("A", Rarity::Iron, Element::Metal);
        let b = Creature::new("B", Rarity::Iron, Element::Energy);
        let (a_id, b_id) = (a.id, b.id);
        let mut player = account(0, vec![a, b]);
        fx.service.toggle_select(&mut player, a_id).unwrap();
        fx.service.toggle_select(&mut player, b_id).unwrap();

        let offspring = fx.service.breed(&mut player).await.unwrap();

        assert_eq!(offspring.rarity(), Rarity::Silver);
        assert_eq!(offspring.element(), Element::Light);
        assert_eq!(player.collection().len(), 1);
        assert_eq!(player.collection().creatures()[0].id, offspring.id);
        assert!(player.collection().selection().is_empty());
        assert_eq!(player.ledger().experience(), 50);
        assert_eq!(player.ledger().currency(), 0);
        assert_eq!(*fx.generator.offspring_calls.lock().unwrap(), vec![Rarity::Silver]);
    }

    #[tokio::test]
    async fn test_breed_failure_consumes_nothing() {
        let fx = fixture(MockGenerator::failing(), PacingConfig::immediate()).await;
        let a = Creature::new("A", Rarity::Wooden, Element::Fire);
        let b = Creature::new("B", Rarity::Golden, Element::Divine);
        let (a_id, b_id) = (a.id, b.id);
        let mut player = account(100, vec![a, b]);
        fx.service.toggle_select(&mut player, a_id).unwrap();
        fx.service.toggle_select(&mut player, b_id).unwrap();

        let err = fx.service.breed(&mut player).await.unwrap_err();

        assert!(matches!(err, GameError::GenerationFailed(_)));
        assert_eq!(player.collection().len(), 2);
        assert_eq!(player.ledger().experience(), 0);
        assert_eq!(player.ledger().currency(), 100);
        assert_eq!(*fx.generator.offspring_calls.lock().unwrap(), vec![Rarity::Golden]);
    }

    #[tokio::test]
    async fn test_breed_requires_a_pair() {
        let fx = fixture(MockGenerator::ok(), PacingConfig::immediate()).await;
        let a = Creature::new("A", Rarity::Golden, Element::Tyrant);
        let b = Creature::new("B", Rarity::Golden, Element::Divine);
        let (a_id, b_id) = (a.id, b.id);
        let mut player = account(0, vec![a, b]);

        fx.service.toggle_select(&mut player, a_id).unwrap();
        assert!(fx.service.toggle_select(&mut player, b_id).is_err());

        let err = fx.service.breed(&mut player).await.unwrap_err();
        assert!(matches!(err, GameError::InvalidSelection(_)));
        assert!(fx.generator.offspring_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sell_credits_and_persists() {
        let fx = fixture(MockGenerator::ok(), PacingConfig::immediate()).await;
        let dragon = Creature::new("Voltfang", Rarity::Iron, Element::Shadow);
        let id = dragon.id;
        let mut player = account(0, vec![dragon]);

        assert_eq!(fx.service.sell(&mut player, id).unwrap(), 210);
        assert_eq!(player.ledger().currency(), 210);
        assert!(player.collection().is_empty());

        fx.queue.flush().await;
        assert_eq!(fx.store.load("ember", "pw").await.unwrap().currency, 210);
    }
}
