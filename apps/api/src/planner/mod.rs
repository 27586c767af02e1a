// Recipe and meal-plan generation.
// All LLM calls go through llm_client::CompletionProvider.

pub mod diet;
pub mod generator;
pub mod grocery;
pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
pub mod shopping;
pub mod store;
