//! Content generator port - Flavor text for new creatures
//!
//! The generator names and describes creatures. For breeding it also picks
//! the offspring's element, which must be one of the fifteen known elements.

use async_trait::async_trait;

use crate::domain::entities::Creature;
use crate::domain::value_objects::{Element, Rarity};

/// Flavor text for a creature
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContent {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Flavor text plus the element chosen for a bred creature
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedOffspring {
    pub content: GeneratedContent,
    pub element: Element,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("LLM error: {0}")]
    Llm(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid element: {0}")]
    InvalidElement(String),
}

#[async_trait]
pub trait ContentGeneratorPort: Send + Sync {
    /// Describe a chest creature of the given rarity and element
    async fn generate(
        &self,
        rarity: Rarity,
        element: Element,
    ) -> Result<GeneratedContent, GenerationError>;

    /// Describe the offspring of two parents and choose its element
    async fn generate_offspring(
        &self,
        target_rarity: Rarity,
        parent_a: &Creature,
        parent_b: &Creature,
    ) -> Result<GeneratedOffspring, GenerationError>;
}
