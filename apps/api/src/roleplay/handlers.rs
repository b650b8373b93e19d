//! Axum route handlers for the roleplay API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::roleplay::catalog::{
    find_character, find_scenario, list_characters, list_scenarios, CharacterSummary,
    ScenarioSummary,
};
use crate::roleplay::conversation::{
    continue_conversation, start_conversation, ConversationReply, OpeningMessage,
};
use crate::roleplay::models::{Character, ConversationTurn, Scenario};
use crate::roleplay::session::validate_turns;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// A preset id or an inline record; the inline record wins when both are sent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CharacterSelection {
    pub character_id: Option<String>,
    pub character: Option<Character>,
    pub scenario_id: Option<String>,
    pub scenario: Option<Scenario>,
}

#[derive(Debug, Deserialize)]
pub struct StartConversationRequest {
    #[serde(flatten)]
    pub selection: CharacterSelection,
}

#[derive(Debug, Deserialize)]
pub struct ContinueConversationRequest {
    #[serde(flatten)]
    pub selection: CharacterSelection,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    pub user_message: String,
}

#[derive(Debug, Serialize)]
pub struct CharacterListResponse {
    pub characters: Vec<CharacterSummary>,
}

#[derive(Debug, Serialize)]
pub struct ScenarioListResponse {
    pub scenarios: Vec<ScenarioSummary>,
}

impl CharacterSelection {
    fn resolve(self) -> Result<(Character, Scenario), AppError> {
        let character = match (self.character, self.character_id) {
            (Some(character), _) => character,
            (None, Some(id)) => find_character(&id)
                .ok_or_else(|| AppError::NotFound(format!("Character {id} not found")))?,
            (None, None) => {
                return Err(AppError::Validation(
                    "either character_id or character is required".to_string(),
                ))
            }
        };

        let scenario = match (self.scenario, self.scenario_id) {
            (Some(scenario), _) => scenario,
            (None, Some(id)) => find_scenario(&id)
                .ok_or_else(|| AppError::NotFound(format!("Scenario {id} not found")))?,
            (None, None) => Scenario::default(),
        };

        Ok((character, scenario))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/characters
pub async fn handle_list_characters() -> Json<CharacterListResponse> {
    Json(CharacterListResponse {
        characters: list_characters(),
    })
}

/// GET /api/v1/scenarios
pub async fn handle_list_scenarios() -> Json<ScenarioListResponse> {
    Json(ScenarioListResponse {
        scenarios: list_scenarios(),
    })
}

/// POST /api/v1/conversations/start
///
/// Asks the character for an opening line. Failures surface as a generic
/// "try again" error; there is no fallback persona.
pub async fn handle_start_conversation(
    State(state): State<AppState>,
    Json(request): Json<StartConversationRequest>,
) -> Result<Json<OpeningMessage>, AppError> {
    let (character, scenario) = request.selection.resolve()?;

    let mut opening = start_conversation(state.llm.as_ref(), character, scenario).await?;
    if !state.config.debug {
        opening.prompt_used = None;
    }

    Ok(Json(opening))
}

/// POST /api/v1/conversations/continue
///
/// Replays the caller's history plus the new message and returns the reply.
pub async fn handle_continue_conversation(
    State(state): State<AppState>,
    Json(request): Json<ContinueConversationRequest>,
) -> Result<Json<ConversationReply>, AppError> {
    if request.user_message.trim().is_empty() {
        return Err(AppError::Validation(
            "user_message cannot be empty".to_string(),
        ));
    }
    validate_turns(&request.history)?;

    let (character, scenario) = request.selection.resolve()?;

    let mut reply = continue_conversation(
        state.llm.as_ref(),
        character,
        scenario,
        &request.history,
        &request.user_message,
    )
    .await?;
    if !state.config.debug {
        reply.prompt_used = None;
    }

    Ok(Json(reply))
}
