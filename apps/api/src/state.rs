use std::sync::Arc;

use crate::llm_client::CompletionBackend;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing here is mutable; every request is independent.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `LlmClient` in production, optionally wrapped in
    /// `RetryingBackend`; tests swap in a fake.
    pub llm: Arc<dyn CompletionBackend>,
}
