// Roleplay conversations: character catalog, prompt composition, workflows.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod catalog;
pub mod composer;
pub mod conversation;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod session;
