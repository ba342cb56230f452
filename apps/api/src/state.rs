use std::sync::Arc;

use crate::llm_client::CompletionProvider;
use crate::sanitize::SanitizationEngine;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn CompletionProvider>,
    /// Chat answer sanitizer, holding the trusted corpus.
    pub sanitizer: Arc<SanitizationEngine>,
}
