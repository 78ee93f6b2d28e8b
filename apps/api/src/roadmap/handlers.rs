//! Axum route handlers for roadmap generation and retrieval.

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
use crate::interpret::interpret;
use crate::models::roadmap::RoadmapRow;
use crate::roadmap::prompts::{build_roadmap_prompt, ROADMAP_SYSTEM};
use crate::state::AppState;
use crate::store::{NewRoadmap, PERSISTENCE_WARNING};
use crate::validation::{validate_profile, GenerateRequest};

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub roadmap: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: Uuid,
}

/// POST /generate
///
/// Validate, render the prompt, call the model, interpret, persist. A failed
/// insert downgrades to a warning; the generated document is returned either way.
pub async fn handle_generate(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<RoadmapResponse>, AppError> {
    let profile = validate_profile(&request)?;

    let prompt = build_roadmap_prompt(&profile);
    let raw = state
        .llm
        .complete(&prompt, ROADMAP_SYSTEM, true)
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;

    let document = interpret(&raw, true);

    let record = NewRoadmap {
        user_id: identity.user_id.clone(),
        profile,
        content: document.to_string(),
    };
    let (id, warning) = match state.store.insert_roadmap(record).await {
        Ok(id) => {
            info!("Stored roadmap {id} for user {}", identity.user_id);
            (Some(id), None)
        }
        Err(e) => {
            error!(
                "Failed to persist roadmap for user {}: {e}",
                identity.user_id
            );
            (None, Some(PERSISTENCE_WARNING))
        }
    };

    Ok(Json(RoadmapResponse {
        roadmap: document,
        id,
        warning,
    }))
}

/// GET /roadmaps
///
/// All roadmaps owned by the caller, newest first.
pub async fn handle_list(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<RoadmapRow>>, AppError> {
    Ok(Json(state.store.list_roadmaps(&identity.user_id).await?))
}

/// DELETE /roadmaps/:id
///
/// Removes the record only when both the id and the caller match. A foreign
/// or nonexistent id yields the same 404.
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.store.delete_roadmap(id, &identity.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Record not found".to_string()));
    }
    Ok(Json(DeleteResponse { deleted: true, id }))
}
