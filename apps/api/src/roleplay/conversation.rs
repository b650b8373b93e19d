//! Conversation workflows. Stateless: the caller supplies the character,
//! scenario and history on every call.
//!
//! There is no fallback persona. Gateway failures propagate unchanged.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::llm_client::{CompletionGateway, CompletionRequest, LlmError};
use crate::normalizer::extract_reply;
use crate::roleplay::composer::{compose_character_prompt, Continuation};
use crate::roleplay::models::{Character, ConversationTurn, Scenario};

const OPENING_MAX_TOKENS: u32 = 200;
const REPLY_MAX_TOKENS: u32 = 300;

#[derive(Debug, Clone, Serialize)]
pub struct OpeningMessage {
    /// Generated here for the client to correlate later turns; never stored.
    pub conversation_id: String,
    pub character_name: String,
    pub opening_message: String,
    pub timestamp: DateTime<Utc>,
    /// Stripped by the HTTP layer unless debug mode is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_used: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationReply {
    pub character_name: String,
    pub reply: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_used: Option<String>,
}

pub async fn start_conversation(
    gateway: &dyn CompletionGateway,
    character: Character,
    scenario: Scenario,
) -> Result<OpeningMessage, LlmError> {
    let character = character.normalized();
    let scenario = scenario.normalized();

    let prompt = compose_character_prompt(&character, &scenario, None);
    debug!(
        "Starting conversation with {} ({} prompt chars)",
        character.name,
        prompt.len()
    );

    let raw = gateway
        .complete(&CompletionRequest::new(prompt.clone(), OPENING_MAX_TOKENS))
        .await?;

    Ok(OpeningMessage {
        conversation_id: format!("conv_{}", Uuid::new_v4().simple()),
        character_name: character.name,
        opening_message: extract_reply(&raw),
        timestamp: Utc::now(),
        prompt_used: Some(prompt),
    })
}

pub async fn continue_conversation(
    gateway: &dyn CompletionGateway,
    character: Character,
    scenario: Scenario,
    history: &[ConversationTurn],
    user_message: &str,
) -> Result<ConversationReply, LlmError> {
    let character = character.normalized();
    let scenario = scenario.normalized();

    let prompt = compose_character_prompt(
        &character,
        &scenario,
        Some(Continuation {
            history,
            user_message,
        }),
    );
    debug!(
        "Continuing conversation with {} ({} turns supplied)",
        character.name,
        history.len()
    );

    let raw = gateway
        .complete(&CompletionRequest::new(prompt.clone(), REPLY_MAX_TOKENS))
        .await?;

    Ok(ConversationReply {
        character_name: character.name,
        reply: extract_reply(&raw),
        timestamp: Utc::now(),
        prompt_used: Some(prompt),
    })
}
