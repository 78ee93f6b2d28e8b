//! Axum route handlers for essay grading and retrieval.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::essay::prompts::{build_essay_prompt, ESSAY_SYSTEM};
use crate::interpret::interpret;
use crate::models::essay::EssayRow;
use crate::roadmap::handlers::DeleteResponse;
use crate::state::AppState;
use crate::store::{NewEssay, PERSISTENCE_WARNING};
use crate::validation::{validate_essay, EssayRequest};

#[derive(Debug, Serialize)]
pub struct EssayFeedbackResponse {
    pub feedback: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

/// POST /essay
///
/// Same pipeline as roadmap generation, but the feedback is free-form prose
/// rather than a structured document.
pub async fn handle_grade(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<EssayRequest>,
) -> Result<Json<EssayFeedbackResponse>, AppError> {
    let submission = validate_essay(&request)?;

    let prompt = build_essay_prompt(&submission);
    let raw = state
        .llm
        .complete(&prompt, ESSAY_SYSTEM, false)
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;

    let feedback = interpret(&raw, false);

    let record = NewEssay {
        user_id: identity.user_id.clone(),
        submission,
        feedback: raw,
    };
    let (id, warning) = match state.store.insert_essay(record).await {
        Ok(id) => {
            info!("Stored essay feedback {id} for user {}", identity.user_id);
            (Some(id), None)
        }
        Err(e) => {
            error!(
                "Failed to persist essay feedback for user {}: {e}",
                identity.user_id
            );
            (None, Some(PERSISTENCE_WARNING))
        }
    };

    Ok(Json(EssayFeedbackResponse {
        feedback,
        id,
        warning,
    }))
}

/// GET /essays
pub async fn handle_list(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<EssayRow>>, AppError> {
    Ok(Json(state.store.list_essays(&identity.user_id).await?))
}

/// DELETE /essays/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.store.delete_essay(id, &identity.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Record not found".to_string()));
    }
    Ok(Json(DeleteResponse { deleted: true, id }))
}
