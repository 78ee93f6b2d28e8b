pub mod health;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;
use crate::{auth, essay, feedback, ratelimit, roadmap};

/// Assembles the application router.
///
/// Generation routes run the fixed pipeline: rate limit, then authentication,
/// then the handler. Record routes authenticate only. The layer order here is
/// the pipeline order; tests assert it.
pub fn build_router(state: AppState) -> Router {
    let generation = Router::new()
        .route("/generate", post(roadmap::handlers::handle_generate))
        .route("/essay", post(essay::handlers::handle_grade))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_identity,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ratelimit::enforce,
        ));

    let records = Router::new()
        .route("/roadmaps", get(roadmap::handlers::handle_list))
        .route("/roadmaps/:id", delete(roadmap::handlers::handle_delete))
        .route("/essays", get(essay::handlers::handle_list))
        .route("/essays/:id", delete(essay::handlers::handle_delete))
        .route("/admin/feedback", get(feedback::handle_admin_list))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_identity,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/feedback", post(feedback::handle_submit))
        .merge(generation)
        .merge(records)
        .with_state(state)
}
