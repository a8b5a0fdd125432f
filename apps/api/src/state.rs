use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Model provider. Default: `GeminiClient`; tests inject a scripted generator.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
