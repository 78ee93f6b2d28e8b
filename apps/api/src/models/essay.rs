use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted essay grading: the submission plus the generated feedback.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EssayRow {
    pub id: Uuid,
    pub user_id: String,
    pub grade: String,
    pub prompt: String,
    pub essay: String,
    pub program: String,
    pub word_limit: Option<i32>,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}
