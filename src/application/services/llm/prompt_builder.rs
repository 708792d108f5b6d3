//! Prompt building functions for dragon generation requests

use crate::domain::entities::Creature;
use crate::domain::value_objects::{Element, Rarity};

pub const CHEST_SYSTEM_PROMPT: &str =
    "You are the Dragon Treasury. You create unique dragons bound to the elements.";

pub const BREEDING_SYSTEM_PROMPT: &str =
    "You are the Dragon Master. You crossbreed two dragons to create a new kind.";

/// Comma separated list of every element name, used to constrain the model
pub fn element_list() -> String {
    Element::ALL
        .iter()
        .map(Element::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// User prompt for a dragon hatched from a chest
pub fn build_chest_prompt(rarity: Rarity, element: Element) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!("Create a dragon of the {} element.\n", element));
    prompt.push_str(&format!("Chest rarity: {} star(s).\n\n", rarity.tier()));
    prompt.push_str("1. Give it a beautiful fantasy name.\n");
    prompt.push_str(&format!(
        "2. Write a short but epic description (rhymed or as a legend) revealing its bond with {}.\n",
        element
    ));
    prompt.push_str("3. Add 2-3 tags (traits).\n\n");
    prompt.push_str(RESPONSE_FORMAT);

    prompt
}

/// User prompt for the offspring of two parents
pub fn build_breeding_prompt(target: Rarity, parent_a: &Creature, parent_b: &Creature) -> String {
    let mut prompt = String::new();

    prompt.push_str("Crossbreed two dragons:\n");
    for (idx, parent) in [parent_a, parent_b].iter().enumerate() {
        prompt.push_str(&format!(
            "{}. \"{}\" (Element: {}, Rarity: {}*, Description: {})\n",
            idx + 1,
            parent.name,
            parent.element(),
            parent.rarity().tier(),
            parent.description
        ));
    }
    prompt.push_str(&format!(
        "\nGoal: create a new dragon of rarity {} stars.\n\n",
        target.tier()
    ));

    prompt.push_str("Tasks:\n");
    prompt.push_str("1. Choose the offspring's element.\n");
    prompt.push_str("   - If the parents' rarities differ, lean toward the rarer parent.\n");
    prompt.push_str("   - If they match, a mutation is possible.\n");
    prompt.push_str(&format!("   Available elements: {}.\n", element_list()));
    prompt.push_str("2. Name it.\n");
    prompt.push_str("3. Write a description explaining its descent from both parents.\n");
    prompt.push_str("4. Tags.\n\n");
    prompt.push_str(RESPONSE_FORMAT);
    prompt.push_str("Also include \"element\": exactly one name from the available elements.\n");

    prompt
}

const RESPONSE_FORMAT: &str = r#"RESPONSE FORMAT:
Respond with a single JSON object and nothing else:
{"name": "...", "description": "...", "tags": ["...", "..."]}
"#;
