//! Dragon Generation Service - Flavor text from a language model
//!
//! Implements the content generator port on top of any [`LlmPort`]. The
//! model is asked for a single JSON object; markdown fences or chatter
//! around that object are tolerated, anything else is a generation failure.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::application::ports::outbound::{
    ChatMessage, ContentGeneratorPort, GeneratedContent, GeneratedOffspring, GenerationError,
    LlmPort, LlmRequest,
};
use crate::application::services::llm::prompt_builder;
use crate::domain::entities::Creature;
use crate::domain::value_objects::{Element, Rarity};

const CHEST_TEMPERATURE: f32 = 0.9;
const BREEDING_TEMPERATURE: f32 = 0.95;

/// Service that turns rarity/element descriptors into named dragons
pub struct DragonGenerationService<L: LlmPort> {
    llm: L,
}

impl<L: LlmPort> DragonGenerationService<L> {
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: String,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        debug!(prompt = %user_prompt, "Sending generation prompt");

        let request = LlmRequest::new(vec![ChatMessage::user(user_prompt)])
            .with_system_prompt(system_prompt)
            .with_temperature(temperature)
            .expecting_json();

        let response = self.llm.generate(request).await.map_err(|e| {
            warn!(error = %e, "LLM request failed");
            GenerationError::Llm(e.to_string())
        })?;
        debug!(model = %response.model, tokens = response.tokens_used, "Generation reply received");

        if response.content.trim().is_empty() {
            return Err(GenerationError::Parse("No text returned from model".to_string()));
        }
        Ok(response.content)
    }
}

#[async_trait]
impl<L: LlmPort> ContentGeneratorPort for DragonGenerationService<L> {
    #[instrument(skip(self))]
    async fn generate(
        &self,
        rarity: Rarity,
        element: Element,
    ) -> Result<GeneratedContent, GenerationError> {
        let prompt = prompt_builder::build_chest_prompt(rarity, element);
        let raw = self
            .complete(prompt_builder::CHEST_SYSTEM_PROMPT, prompt, CHEST_TEMPERATURE)
            .await?;
        parse_content(&raw)
    }

    #[instrument(skip(self, parent_a, parent_b), fields(first = %parent_a.id, second = %parent_b.id))]
    async fn generate_offspring(
        &self,
        target_rarity: Rarity,
        parent_a: &Creature,
        parent_b: &Creature,
    ) -> Result<GeneratedOffspring, GenerationError> {
        let prompt = prompt_builder::build_breeding_prompt(target_rarity, parent_a, parent_b);
        let raw = self
            .complete(prompt_builder::BREEDING_SYSTEM_PROMPT, prompt, BREEDING_TEMPERATURE)
            .await?;
        parse_offspring(&raw)
    }
}

#[derive(Debug, Deserialize)]
struct ContentPayload {
    name: String,
    #[serde(alias = "content")]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OffspringPayload {
    #[serde(flatten)]
    content: ContentPayload,
    #[serde(alias = "newElement", alias = "new_element")]
    element: String,
}

/// Slice out the outermost `{...}` of a model reply
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn decode<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T, GenerationError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| GenerationError::Parse("Response contains no JSON object".to_string()))?;
    serde_json::from_str(json).map_err(|e| GenerationError::Parse(e.to_string()))
}

fn into_content(payload: ContentPayload) -> Result<GeneratedContent, GenerationError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(GenerationError::Parse("Missing dragon name".to_string()));
    }
    let description = payload.description.trim().to_string();
    if description.is_empty() {
        return Err(GenerationError::Parse("Missing dragon description".to_string()));
    }
    let tags = payload
        .tags
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    Ok(GeneratedContent {
        name,
        description,
        tags,
    })
}

pub(crate) fn parse_content(raw: &str) -> Result<GeneratedContent, GenerationError> {
    into_content(decode::<ContentPayload>(raw)?)
}

pub(crate) fn parse_offspring(raw: &str) -> Result<GeneratedOffspring, GenerationError> {
    let payload: OffspringPayload = decode(raw)?;
    let element: Element = payload
        .element
        .parse()
        .map_err(|_| GenerationError::InvalidElement(payload.element.clone()))?;

    Ok(GeneratedOffspring {
        content: into_content(payload.content)?,
        element,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::LlmResponse;
    use std::sync::Mutex;

    /// Canned LLM that records the last request it saw
    struct MockLlm {
        reply: Result<String, String>,
        last_request: Mutex<Option<LlmRequest>>,
    }

    impl MockLlm {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                last_request: Mutex::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl LlmPort for MockLlm {
        type Error = std::io::Error;

        async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, Self::Error> {
            *self.last_request.lock().unwrap() = Some(request);
            match &self.reply {
                Ok(content) => Ok(LlmResponse {
                    content: content.clone(),
                    model: "mock".to_string(),
                    tokens_used: 0,
                }),
                Err(message) => Err(std::io::Error::new(std::io::ErrorKind::Other, message.clone())),
            }
        }
    }

    #[test]
    fn test_parse_content_with_fences() {
        let raw = "```json\n{\"name\": \"Emberwing\", \"description\": \"Born of ash\", \"tags\": [\"Scales\", \" \"]}\n```";
        let content = parse_content(raw).unwrap();
        assert_eq!(content.name, "Emberwing");
        assert_eq!(content.description, "Born of ash");
        assert_eq!(content.tags, vec!["Scales".to_string()]);
    }

    #[test]
    fn test_parse_content_accepts_content_alias() {
        let raw = r#"{"name": "Mossback", "content": "Slow and green"}"#;
        let content = parse_content(raw).unwrap();
        assert_eq!(content.description, "Slow and green");
        assert!(content.tags.is_empty());
    }

    #[test]
    fn test_parse_content_rejects_missing_payload() {
        assert!(matches!(parse_content("I cannot do that"), Err(GenerationError::Parse(_))));
        assert!(matches!(
            parse_content(r#"{"name": "", "description": "x"}"#),
            Err(GenerationError::Parse(_))
        ));
        assert!(matches!(
            parse_content(r#"{"description": "x"}"#),
            Err(GenerationError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_offspring_element() {
        let raw = r#"{"name": "Gloomfang", "description": "Child of two", "tags": [], "newElement": "shadow"}"#;
        let offspring = parse_offspring(raw).unwrap();
        assert_eq!(offspring.element, Element::Shadow);
        assert_eq!(offspring.content.name, "Gloomfang");

        let raw = r#"{"name": "Gloomfang", "description": "Child of two", "element": "Lava"}"#;
        assert!(matches!(parse_offspring(raw), Err(GenerationError::InvalidElement(e)) if e == "Lava"));
    }

    #[tokio::test]
    async fn test_generate_sends_json_request() {
        let llm = MockLlm::replying(r#"{"name": "Cinder", "description": "Hot", "tags": ["Breath"]}"#);
        let service = DragonGenerationService::new(llm);

        let content = service.generate(Rarity::Wooden, Element::Fire).await.unwrap();
        assert_eq!(content.name, "Cinder");

        let request = service.llm.last_request.lock().unwrap().clone().unwrap();
        assert!(request.json_response);
        assert_eq!(request.temperature, Some(CHEST_TEMPERATURE));
        assert!(request.messages[0].content.contains("Fire element"));
    }

    #[tokio::test]
    async fn test_llm_failure_maps_to_generation_error() {
        let service = DragonGenerationService::new(MockLlm::failing("connection refused"));
        let err = service.generate(Rarity::Iron, Element::Metal).await.unwrap_err();
        assert!(matches!(err, GenerationError::Llm(msg) if msg.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_empty_reply_is_a_failure() {
        let service = DragonGenerationService::new(MockLlm::replying("   "));
        let a = Creature::new("A", Rarity::Iron, Element::Metal);
        let b = Creature::new("B", Rarity::Iron, Element::Energy);
        let err = service.generate_offspring(Rarity::Silver, &a, &b).await.unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }
}
