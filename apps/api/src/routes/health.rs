use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::llm_client::{check_connectivity, ConnectivityReport};
use crate::state::AppState;

/// GET /
/// Service description and endpoint index.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "name": "Conversation Trainer API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "AI conversation practice for NSW local government",
        "endpoints": {
            "health": "/health",
            "characters": "/api/v1/characters",
            "scenarios": "/api/v1/scenarios",
            "conversations": "/api/v1/conversations/{start,continue}",
            "email_analysis": "/api/v1/email/analyze",
            "llm_status": "/api/v1/llm/status"
        }
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "trainer-api",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// GET /api/v1/llm/status
/// Probes the remote model. Always 200; `ok` carries the outcome.
pub async fn llm_status_handler(State(state): State<AppState>) -> Json<ConnectivityReport> {
    Json(check_connectivity(state.llm.as_ref()).await)
}
