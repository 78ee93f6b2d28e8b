//! Product feedback notes.
//!
//! Submission is unauthenticated and append-only, keyed by the submitter's
//! network address. Reading the inbox requires an authenticated identity on
//! the admin allow-list; everyone else sees the same 404 a missing resource
//! would produce.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::feedback::FeedbackNoteRow;
use crate::state::AppState;
use crate::store::NewFeedbackNote;
use crate::validation::{check_length, required_field, FEEDBACK_MAX};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeedbackRequest {
    #[serde(alias = "message")]
    pub feedback: Option<String>,
}

/// POST /feedback
pub async fn handle_submit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<Value>, AppError> {
    let message = required_field(&request.feedback, "feedback")?;
    check_length("feedback", &message, FEEDBACK_MAX)?;

    let id = state
        .store
        .insert_feedback(NewFeedbackNote {
            message,
            client_addr: addr.ip().to_string(),
        })
        .await?;

    Ok(Json(json!({ "success": true, "id": id })))
}

/// GET /admin/feedback
pub async fn handle_admin_list(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<FeedbackNoteRow>>, AppError> {
    let allowed = state
        .config
        .admin_emails
        .iter()
        .any(|email| email.eq_ignore_ascii_case(&identity.email));
    if !allowed {
        return Err(AppError::NotFound("Record not found".to_string()));
    }

    Ok(Json(state.store.list_feedback().await?))
}
