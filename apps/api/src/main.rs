mod auth;
mod config;
mod db;
mod errors;
mod essay;
mod feedback;
mod interpret;
mod llm_client;
mod models;
mod ratelimit;
mod roadmap;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;
mod validation;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::SupabaseVerifier;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::OpenAiClient;
use crate::ratelimit::{RateLimiter, GENERATION_QUOTA, GENERATION_WINDOW};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("compass_api={}", &config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and bootstrap the schema
    let pool = create_pool(&config.database_url).await?;
    ensure_schema(&pool).await?;

    // Initialize the completion client
    let llm = OpenAiClient::new(config.openai_api_key.clone());
    info!("Completion client initialized (model: {})", llm_client::MODEL);

    // Initialize the token verifier
    let verifier = SupabaseVerifier::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
        config.dev_auth_bypass,
    );
    if config.dev_auth_bypass {
        warn!("Dev auth bypass is ENABLED; do not run this configuration in production");
    }

    // Build app state
    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        llm: Arc::new(llm),
        verifier: Arc::new(verifier),
        limiter: Arc::new(RateLimiter::new(GENERATION_QUOTA, GENERATION_WINDOW)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// CORS layer from the configured origin allow-list. Credentials are allowed,
/// so origins must be listed explicitly rather than wildcarded.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}
