//! LLM prompt helpers

pub mod prompt_builder;
