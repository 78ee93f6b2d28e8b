use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::llm_client::CompletionBackend;
use crate::ratelimit::RateLimiter;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every external dependency sits behind a trait object so tests can swap in
/// doubles without a database, an auth service, or a live model endpoint.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub llm: Arc<dyn CompletionBackend>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub limiter: Arc<RateLimiter>,
    pub config: Config,
}
