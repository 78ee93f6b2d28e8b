//! Identity resolution.
//!
//! Token verification is delegated to the Supabase auth endpoint; this module
//! never inspects or stores credentials beyond forwarding the bearer token.
//! Downstream handlers only ever see the resolved [`Identity`].

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Fixed token the web client sends when running against a local backend.
/// Honored only when `DEV_AUTH_BYPASS` is set; otherwise rejected outright
/// (it is never forwarded to the auth service).
pub const DEV_BYPASS_TOKEN: &str = "dev-token-bypass";
const DEV_USER_ID: &str = "00000000-0000-0000-0000-000000000000";
const DEV_EMAIL: &str = "dev@localhost";

/// The authenticated principal. `user_id` is the auth service's opaque
/// identifier and the ownership key on every persisted record.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Exchanges a bearer token for a caller identity.
    /// Invalid, expired, or malformed tokens yield `AppError::Unauthorized`.
    async fn verify(&self, token: &str) -> Result<Identity, AppError>;
}

/// Verifies tokens against the Supabase `/auth/v1/user` endpoint.
pub struct SupabaseVerifier {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
    dev_bypass: bool,
}

impl SupabaseVerifier {
    pub fn new(auth_url: String, anon_key: String, dev_bypass: bool) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            auth_url,
            anon_key,
            dev_bypass,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: String,
    email: Option<String>,
}

#[async_trait]
impl TokenVerifier for SupabaseVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AppError> {
        if token == DEV_BYPASS_TOKEN {
            if self.dev_bypass {
                return Ok(Identity {
                    user_id: DEV_USER_ID.to_string(),
                    email: DEV_EMAIL.to_string(),
                });
            }
            return Err(AppError::Unauthorized);
        }

        let url = format!("{}/auth/v1/user", self.auth_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| {
                warn!("Token verification request failed: {e}");
                AppError::Unauthorized
            })?;

        if !response.status().is_success() {
            warn!("Token verification rejected: {}", response.status());
            return Err(AppError::Unauthorized);
        }

        let user: SupabaseUser = response.json().await.map_err(|e| {
            warn!("Token verification returned malformed body: {e}");
            AppError::Unauthorized
        })?;

        Ok(Identity {
            user_id: user.id,
            email: user.email.unwrap_or_default(),
        })
    }
}

/// Middleware for authenticated routes. Resolves the bearer token and stores
/// the [`Identity`] in request extensions; the token goes no further.
pub async fn require_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())
        .ok_or(AppError::Unauthorized)?
        .to_string();
    let identity = state.verifier.verify(&token).await?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
