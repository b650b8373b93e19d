//! LLM client: the single point of entry for all Claude API calls in the trainer.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! All completions go through the [`CompletionGateway`] trait, which handlers
//! receive through `AppState` rather than from a global.
//!
//! Model: claude-sonnet-4-5 (hardcoded)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
pub const MODEL: &str = "claude-sonnet-4-5";
/// Hard budget for a single completion, connect through body.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECTIVITY_MAX_TOKENS: u32 = 50;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM credential is not configured")]
    NotConfigured,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("no response within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Who spoke a turn that is replayed ahead of the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorTurn {
    pub role: PriorRole,
    pub content: String,
}

/// One completion request. The prompt is always sent as the final user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    /// Sent through the dedicated `system` field, never merged into a user turn.
    pub system: Option<String>,
    pub prior_turns: Vec<PriorTurn>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            system: None,
            prior_turns: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    #[cfg(test)]
    pub fn with_prior_turns(mut self, turns: Vec<PriorTurn>) -> Self {
        self.prior_turns = turns;
        self
    }
}

/// The remote text-generation boundary. Implemented by [`LlmClient`] in
/// production and by stubs in tests.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Issues exactly one remote call and returns the reply text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: PriorRole,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Wraps the Anthropic Messages API. One outbound call per `complete`,
/// no retries and no caching.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    messages_url: String,
    timeout: Duration,
}

impl LlmClient {
    pub fn new(api_key: Option<String>, base_url: &str) -> Result<Self, LlmError> {
        Self::with_timeout(
            api_key,
            base_url,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    /// Same as [`LlmClient::new`] with an explicit per-request budget.
    pub fn with_timeout(
        api_key: Option<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            messages_url: format!("{}/v1/messages", base_url.trim_end_matches('/')),
            timeout,
        })
    }

    fn classify_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if err.is_decode() {
            LlmError::MalformedResponse(err.to_string())
        } else {
            LlmError::Transport(err.to_string())
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_body<'a>(request: &'a CompletionRequest) -> AnthropicRequest<'a> {
        let mut messages: Vec<AnthropicMessage<'a>> = request
            .prior_turns
            .iter()
            .map(|turn| AnthropicMessage {
                role: turn.role,
                content: &turn.content,
            })
            .collect();
        messages.push(AnthropicMessage {
            role: PriorRole::User,
            content: &request.prompt,
        });

        AnthropicRequest {
            model: MODEL,
            max_tokens: request.max_tokens,
            system: request.system.as_deref(),
            messages,
        }
    }
}

#[async_trait]
impl CompletionGateway for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;
        let body = Self::build_body(request);

        debug!(
            "LLM call: prompt_chars={}, prior_turns={}, max_tokens={}",
            request.prompt.len(),
            request.prior_turns.len(),
            request.max_tokens
        );

        let response = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify_error(e))?;

        if !status.is_success() {
            warn!("LLM API returned {}: {}", status, text);
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let decoded: AnthropicResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::MalformedResponse(format!("undecodable envelope: {e}")))?;

        if let Some(usage) = &decoded.usage {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        decoded
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| LlmError::MalformedResponse("missing content[0].text".to_string()))
    }
}


/// Outcome of a connectivity probe. Never an error: failures land in `detail`.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectivityReport {
    pub ok: bool,
    pub detail: String,
    pub model: &'static str,
}

/// Sends a tiny prompt and reports whether the remote service answered.
pub async fn check_connectivity(gateway: &dyn CompletionGateway) -> ConnectivityReport {
    let request = CompletionRequest::new(prompts::CONNECTIVITY_PROBE, CONNECTIVITY_MAX_TOKENS);

    match gateway.complete(&request).await {
        Ok(reply) => ConnectivityReport {
            ok: true,
            detail: format!("Claude API connection working: {}", reply.trim()),
            model: MODEL,
        },
        Err(e) => {
            warn!("Connectivity check failed: {e}");
            ConnectivityReport {
                ok: false,
                detail: format!("Claude API connection failed: {e}"),
                model: MODEL,
            }
        }
    }
}
