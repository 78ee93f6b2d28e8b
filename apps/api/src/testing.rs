//! Test doubles and request helpers shared by handler tests.
//!
//! Every `AppState` seam has a substitute here: an in-memory (or always
//! failing) record store, a scripted completion backend that counts its
//! calls, and a token verifier with a fixed token table.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Request};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{Identity, TokenVerifier};
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{CompletionBackend, LlmError};
use crate::models::essay::EssayRow;
use crate::models::feedback::FeedbackNoteRow;
use crate::models::roadmap::RoadmapRow;
use crate::ratelimit::RateLimiter;
use crate::state::AppState;
use crate::store::{NewEssay, NewFeedbackNote, NewRoadmap, RecordStore};

pub const TOKEN_A: &str = "token-user-a";
pub const TOKEN_B: &str = "token-user-b";
pub const TOKEN_ADMIN: &str = "token-admin";
pub const USER_A: &str = "11111111-1111-1111-1111-111111111111";
pub const USER_B: &str = "22222222-2222-2222-2222-222222222222";
const USER_ADMIN: &str = "33333333-3333-3333-3333-333333333333";

// ── Record store doubles ────────────────────────────────────────────────────

pub struct MemoryStore {
    fail_inserts: bool,
    roadmaps: Mutex<Vec<RoadmapRow>>,
    essays: Mutex<Vec<EssayRow>>,
    feedback: Mutex<Vec<FeedbackNoteRow>>,
}

impl MemoryStore {
    fn new(fail_inserts: bool) -> Self {
        Self {
            fail_inserts,
            roadmaps: Mutex::new(Vec::new()),
            essays: Mutex::new(Vec::new()),
            feedback: Mutex::new(Vec::new()),
        }
    }
}

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(false))
}

/// A store whose inserts always fail, for persistence-degradation tests.
pub fn failing_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(true))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_roadmap(&self, record: NewRoadmap) -> Result<Uuid, sqlx::Error> {
        if self.fail_inserts {
            return Err(sqlx::Error::PoolClosed);
        }
        let id = Uuid::new_v4();
        let p = record.profile;
        self.roadmaps.lock().expect("lock").push(RoadmapRow {
            id,
            user_id: record.user_id,
            grade: p.grade,
            gpa: p.gpa,
            interests: p.interests,
            activities: p.activities,
            demographics: p.demographics,
            testing: p.testing,
            college_goals: p.college_goals,
            classes: p.classes,
            location: p.location,
            roadmap_content: record.content,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_roadmaps(&self, user_id: &str) -> Result<Vec<RoadmapRow>, sqlx::Error> {
        let rows = self.roadmaps.lock().expect("lock");
        // Insertion order is chronological; newest first.
        Ok(rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .rev()
            .collect())
    }

    async fn delete_roadmap(&self, id: Uuid, user_id: &str) -> Result<bool, sqlx::Error> {
        let mut rows = self.roadmaps.lock().expect("lock");
        let before = rows.len();
        rows.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(rows.len() < before)
    }

    async fn insert_essay(&self, record: NewEssay) -> Result<Uuid, sqlx::Error> {
        if self.fail_inserts {
            return Err(sqlx::Error::PoolClosed);
        }
        let id = Uuid::new_v4();
        let s = record.submission;
        self.essays.lock().expect("lock").push(EssayRow {
            id,
            user_id: record.user_id,
            grade: s.grade,
            prompt: s.prompt,
            essay: s.essay,
            program: s.program,
            word_limit: s.word_limit.map(|w| w as i32),
            feedback: record.feedback,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_essays(&self, user_id: &str) -> Result<Vec<EssayRow>, sqlx::Error> {
        let rows = self.essays.lock().expect("lock");
        Ok(rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .rev()
            .collect())
    }

    async fn delete_essay(&self, id: Uuid, user_id: &str) -> Result<bool, sqlx::Error> {
        let mut rows = self.essays.lock().expect("lock");
        let before = rows.len();
        rows.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(rows.len() < before)
    }

    async fn insert_feedback(&self, note: NewFeedbackNote) -> Result<Uuid, sqlx::Error> {
        if self.fail_inserts {
            return Err(sqlx::Error::PoolClosed);
        }
        let id = Uuid::new_v4();
        self.feedback.lock().expect("lock").push(FeedbackNoteRow {
            id,
            message: note.message,
            client_addr: note.client_addr,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_feedback(&self) -> Result<Vec<FeedbackNoteRow>, sqlx::Error> {
        Ok(self
            .feedback
            .lock()
            .expect("lock")
            .iter()
            .cloned()
            .rev()
            .collect())
    }
}

// ── Completion backend double ───────────────────────────────────────────────

pub struct ScriptedCompletion {
    reply: String,
    fail: bool,
    calls: AtomicUsize,
}

impl ScriptedCompletion {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for ScriptedCompletion {
    async fn complete(
        &self,
        _prompt: &str,
        _system: &str,
        _json_mode: bool,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LlmError::Api {
                status: 503,
                message: "scripted failure".to_string(),
            });
        }
        Ok(self.reply.clone())
    }
}

// ── Token verifier double ───────────────────────────────────────────────────

pub struct StaticVerifier {
    identities: HashMap<String, Identity>,
}

impl StaticVerifier {
    pub fn standard() -> Self {
        let mut identities = HashMap::new();
        identities.insert(
            TOKEN_A.to_string(),
            Identity {
                user_id: USER_A.to_string(),
                email: "a@example.com".to_string(),
            },
        );
        identities.insert(
            TOKEN_B.to_string(),
            Identity {
                user_id: USER_B.to_string(),
                email: "b@example.com".to_string(),
            },
        );
        identities.insert(
            TOKEN_ADMIN.to_string(),
            Identity {
                user_id: USER_ADMIN.to_string(),
                email: "admin@example.com".to_string(),
            },
        );
        Self { identities }
    }
}

#[async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AppError> {
        self.identities
            .get(token)
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

// ── State and request helpers ───────────────────────────────────────────────

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        openai_api_key: String::new(),
        supabase_url: String::new(),
        supabase_anon_key: String::new(),
        allowed_origins: Vec::new(),
        admin_emails: vec!["admin@example.com".to_string()],
        dev_auth_bypass: false,
        port: 0,
        rust_log: "info".to_string(),
    }
}

/// State with a generous rate limit; tests that exercise the limiter swap in
/// their own.
pub fn test_state(store: Arc<dyn RecordStore>, llm: Arc<dyn CompletionBackend>) -> AppState {
    AppState {
        store,
        llm,
        verifier: Arc::new(StaticVerifier::standard()),
        limiter: Arc::new(RateLimiter::new(100, Duration::from_secs(60))),
        config: test_config(),
    }
}

fn default_connect_info() -> ConnectInfo<SocketAddr> {
    ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000)))
}

pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let mut request = builder.body(Body::from(body.to_string())).expect("request");
    request.extensions_mut().insert(default_connect_info());
    request
}

pub fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let mut request = builder.body(Body::empty()).expect("request");
    request.extensions_mut().insert(default_connect_info());
    request
}

pub fn with_addr(mut request: Request<Body>, addr: SocketAddr) -> Request<Body> {
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// The structured document shape the roadmap prompt requests.
pub fn roadmap_fixture() -> Value {
    json!({
        "student_summary": "Strong junior on a pre-med track.",
        "college_list_suggestions": {
            "reach": ["Duke"],
            "target": ["Ohio State"],
            "safety": ["Kent State"]
        },
        "timeline": [
            {
                "period": "11th grade, May",
                "focus": "Testing",
                "tasks": ["Take the June SAT"]
            }
        ],
        "academic_plan": {
            "course_suggestions": ["AP Biology"],
            "testing_strategy": "Aim for 1450+."
        },
        "extracurriculars": {
            "current_optimization": "Lead a HOSA project.",
            "new_opportunities": ["State science fair"]
        }
    })
}
