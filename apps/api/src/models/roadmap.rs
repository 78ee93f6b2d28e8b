use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted roadmap generation: the profile as submitted plus the
/// serialized generated document. Written once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoadmapRow {
    pub id: Uuid,
    pub user_id: String,
    pub grade: String,
    pub gpa: f64,
    pub interests: String,
    pub activities: String,
    pub demographics: String,
    pub testing: String,
    pub college_goals: String,
    pub classes: String,
    pub location: String,
    pub roadmap_content: String,
    pub created_at: DateTime<Utc>,
}
