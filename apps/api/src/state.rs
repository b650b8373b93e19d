use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The only path to the remote model. Built once in `main` and passed
    /// down explicitly; tests swap in a stub.
    pub llm: Arc<dyn CompletionGateway>,
    pub config: Config,
}
