use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Remote model. `LlmClient` in production, a stub in tests.
    pub llm: Arc<dyn ChatModel>,
    pub config: Config,
}
