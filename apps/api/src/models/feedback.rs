use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A product-feedback note. Append-only; carries the submitter's network
/// address instead of an owner, since the endpoint is unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedbackNoteRow {
    pub id: Uuid,
    pub message: String,
    pub client_addr: String,
    pub created_at: DateTime<Utc>,
}
