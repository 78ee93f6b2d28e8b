//! Persistence gateway.
//!
//! Every query that reads or deletes user records carries the owner id in the
//! WHERE clause; ownership is enforced in SQL, not in handler code. Deletes
//! report only whether a row was removed; a missing row and a row owned by
//! someone else are indistinguishable to the caller.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::essay::EssayRow;
use crate::models::feedback::FeedbackNoteRow;
use crate::models::roadmap::RoadmapRow;
use crate::validation::{EssaySubmission, StudentProfile};

/// Warning attached to a generation response whose record could not be saved.
/// The generated content is still delivered; only durability is degraded.
pub const PERSISTENCE_WARNING: &str =
    "Generation succeeded but the result could not be saved to your account.";

pub struct NewRoadmap {
    pub user_id: String,
    pub profile: StudentProfile,
    pub content: String,
}

pub struct NewEssay {
    pub user_id: String,
    pub submission: EssaySubmission,
    pub feedback: String,
}

pub struct NewFeedbackNote {
    pub message: String,
    pub client_addr: String,
}

/// Seam between handlers and Postgres. Production uses [`PgStore`]; tests
/// substitute an in-memory or always-failing double.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_roadmap(&self, record: NewRoadmap) -> Result<Uuid, sqlx::Error>;
    async fn list_roadmaps(&self, user_id: &str) -> Result<Vec<RoadmapRow>, sqlx::Error>;
    async fn delete_roadmap(&self, id: Uuid, user_id: &str) -> Result<bool, sqlx::Error>;

    async fn insert_essay(&self, record: NewEssay) -> Result<Uuid, sqlx::Error>;
    async fn list_essays(&self, user_id: &str) -> Result<Vec<EssayRow>, sqlx::Error>;
    async fn delete_essay(&self, id: Uuid, user_id: &str) -> Result<bool, sqlx::Error>;

    async fn insert_feedback(&self, note: NewFeedbackNote) -> Result<Uuid, sqlx::Error>;
    async fn list_feedback(&self) -> Result<Vec<FeedbackNoteRow>, sqlx::Error>;
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn insert_roadmap(&self, record: NewRoadmap) -> Result<Uuid, sqlx::Error> {
        let id = Uuid::new_v4();
        let p = &record.profile;
        sqlx::query(
            r#"
            INSERT INTO roadmaps
                (id, user_id, grade, gpa, interests, activities, demographics,
                 testing, college_goals, classes, location, roadmap_content)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(id)
        .bind(&record.user_id)
        .bind(&p.grade)
        .bind(p.gpa)
        .bind(&p.interests)
        .bind(&p.activities)
        .bind(&p.demographics)
        .bind(&p.testing)
        .bind(&p.college_goals)
        .bind(&p.classes)
        .bind(&p.location)
        .bind(&record.content)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_roadmaps(&self, user_id: &str) -> Result<Vec<RoadmapRow>, sqlx::Error> {
        sqlx::query_as::<_, RoadmapRow>(
            "SELECT * FROM roadmaps WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_roadmap(&self, id: Uuid, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roadmaps WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_essay(&self, record: NewEssay) -> Result<Uuid, sqlx::Error> {
        let id = Uuid::new_v4();
        let s = &record.submission;
        sqlx::query(
            r#"
            INSERT INTO essays
                (id, user_id, grade, prompt, essay, program, word_limit, feedback)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(&record.user_id)
        .bind(&s.grade)
        .bind(&s.prompt)
        .bind(&s.essay)
        .bind(&s.program)
        .bind(s.word_limit.map(|w| w as i32))
        .bind(&record.feedback)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_essays(&self, user_id: &str) -> Result<Vec<EssayRow>, sqlx::Error> {
        sqlx::query_as::<_, EssayRow>(
            "SELECT * FROM essays WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_essay(&self, id: Uuid, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM essays WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_feedback(&self, note: NewFeedbackNote) -> Result<Uuid, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO feedback_notes (id, message, client_addr) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(&note.message)
            .bind(&note.client_addr)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list_feedback(&self) -> Result<Vec<FeedbackNoteRow>, sqlx::Error> {
        sqlx::query_as::<_, FeedbackNoteRow>(
            "SELECT * FROM feedback_notes ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }
}
