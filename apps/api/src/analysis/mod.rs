// Email analysis: prompt composition, model call with heuristic fallback.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod analyzer;
pub mod composer;
pub mod handlers;
pub mod heuristic;
pub mod models;
pub mod prompts;
