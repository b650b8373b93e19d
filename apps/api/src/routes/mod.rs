pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::roleplay::handlers as roleplay;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/llm/status", get(health::llm_status_handler))
        // Catalog
        .route("/api/v1/characters", get(roleplay::handle_list_characters))
        .route("/api/v1/scenarios", get(roleplay::handle_list_scenarios))
        // Conversations
        .route(
            "/api/v1/conversations/start",
            post(roleplay::handle_start_conversation),
        )
        .route(
            "/api/v1/conversations/continue",
            post(roleplay::handle_continue_conversation),
        )
        // Email analysis
        .route(
            "/api/v1/email/analyze",
            post(analysis::handle_analyze_email),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::errors::TRY_AGAIN_MESSAGE;
    use crate::llm_client::testing::StubGateway;
    use crate::llm_client::LlmError;

    fn app(gateway: StubGateway, debug: bool) -> Router {
        build_router(AppState {
            llm: Arc::new(gateway),
            config: Config {
                anthropic_api_key: None,
                anthropic_base_url: "http://localhost".to_string(),
                debug,
                port: 0,
                rust_log: "info".to_string(),
            },
        })
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(StubGateway::replying(""), false), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_characters() {
        let (status, body) =
            send(app(StubGateway::replying(""), false), "GET", "/api/v1/characters", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = body["characters"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect();
        assert!(ids.contains(&"union_rep".to_string()));
    }

    #[tokio::test]
    async fn test_start_conversation_with_preset() {
        let (status, body) = send(
            app(StubGateway::replying("Morning. Let's talk rates."), false),
            "POST",
            "/api/v1/conversations/start",
            Some(json!({"character_id": "frustrated_resident", "scenario_id": "angry_resident"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["opening_message"], "Morning. Let's talk rates.");
        assert_eq!(body["character_name"], "Robert Chen");
        assert!(body.get("prompt_used").is_none());
    }

    #[tokio::test]
    async fn test_debug_mode_exposes_prompt() {
        let (_, body) = send(
            app(StubGateway::replying("Hi."), true),
            "POST",
            "/api/v1/conversations/start",
            Some(json!({"character": {"name": "Alex"}, "scenario": {"description": "Roster change"}})),
        )
        .await;
        assert!(body["prompt_used"]
            .as_str()
            .unwrap()
            .contains("Situation: Roster change"));
    }

    #[tokio::test]
    async fn test_unknown_character_is_404() {
        let (status, body) = send(
            app(StubGateway::replying(""), false),
            "POST",
            "/api/v1/conversations/start",
            Some(json!({"character_id": "ghost"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_character_is_400() {
        let (status, _) = send(
            app(StubGateway::replying(""), false),
            "POST",
            "/api/v1/conversations/start",
            Some(json!({"scenario_id": "budget_cut"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_continue_conversation() {
        let (status, body) = send(
            app(StubGateway::replying("Fine, go on."), false),
            "POST",
            "/api/v1/conversations/continue",
            Some(json!({
                "character_id": "union_rep",
                "history": [
                    {"role": "character", "content": "What's this about?", "ordinal": 0},
                    {"role": "user", "content": "The new roster.", "ordinal": 1}
                ],
                "user_message": "We need to consult on it."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "Fine, go on.");
    }

    #[tokio::test]
    async fn test_continue_rejects_out_of_order_history() {
        let (status, body) = send(
            app(StubGateway::replying("x"), false),
            "POST",
            "/api/v1/conversations/continue",
            Some(json!({
                "character_id": "union_rep",
                "history": [
                    {"role": "user", "content": "b", "ordinal": 5},
                    {"role": "character", "content": "a", "ordinal": 2}
                ],
                "user_message": "c"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_conversation_failure_is_generic_try_again() {
        let (status, body) = send(
            app(
                StubGateway::failing(LlmError::Transport("connection refused".to_string())),
                false,
            ),
            "POST",
            "/api/v1/conversations/continue",
            Some(json!({"character_id": "union_rep", "user_message": "Hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], TRY_AGAIN_MESSAGE);
    }

    #[tokio::test]
    async fn test_analyze_email_falls_back_transparently() {
        let (status, body) = send(
            app(StubGateway::failing(LlmError::NotConfigured), false),
            "POST",
            "/api/v1/email/analyze",
            Some(json!({"subject": "", "body": "YOU ARE STUPID!!", "direction": "outgoing"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provenance"], "fallback");
        assert_eq!(body["compliance"]["status"], "concerning");
        assert_eq!(body["compliance"]["risk_level"], "high");
        assert!(body["overall_score"].as_f64().unwrap() <= 2.0);
    }

    #[tokio::test]
    async fn test_analyze_email_rejects_empty_email() {
        let (status, _) = send(
            app(StubGateway::replying("{}"), false),
            "POST",
            "/api/v1/email/analyze",
            Some(json!({"subject": " ", "body": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_llm_status_never_errors() {
        let (status, body) = send(
            app(StubGateway::failing(LlmError::NotConfigured), false),
            "GET",
            "/api/v1/llm/status",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], false);
        assert!(body["detail"].as_str().unwrap().contains("not configured"));
    }
}
