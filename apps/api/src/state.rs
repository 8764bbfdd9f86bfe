use std::sync::Arc;

use crate::github::GithubClient;
use crate::llm_client::ChatCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub github: GithubClient,
    /// Inference backend. Default: GroqClient; tests swap in canned replies.
    pub llm: Arc<dyn ChatCompletion>,
}
