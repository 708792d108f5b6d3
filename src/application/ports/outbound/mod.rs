//! Outbound ports - Interfaces that the application requires from external systems

mod account_store_port;
mod content_generator_port;
mod llm_port;

pub use account_store_port::{AccountStoreError, AccountStorePort};
pub use content_generator_port::{
    ContentGeneratorPort, GeneratedContent, GeneratedOffspring, GenerationError,
};
pub use llm_port::{ChatMessage, LlmPort, LlmRequest, LlmResponse, MessageRole};
