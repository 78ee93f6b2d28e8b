use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

const CREATE_ROADMAPS: &str = r#"
CREATE TABLE IF NOT EXISTS roadmaps (
    id UUID PRIMARY KEY,
    user_id TEXT NOT NULL,
    grade TEXT NOT NULL,
    gpa DOUBLE PRECISION NOT NULL,
    interests TEXT NOT NULL,
    activities TEXT NOT NULL DEFAULT '',
    demographics TEXT NOT NULL DEFAULT '',
    testing TEXT NOT NULL DEFAULT '',
    college_goals TEXT NOT NULL DEFAULT '',
    classes TEXT NOT NULL DEFAULT '',
    location TEXT NOT NULL DEFAULT '',
    roadmap_content TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_ESSAYS: &str = r#"
CREATE TABLE IF NOT EXISTS essays (
    id UUID PRIMARY KEY,
    user_id TEXT NOT NULL,
    grade TEXT NOT NULL,
    prompt TEXT NOT NULL,
    essay TEXT NOT NULL,
    program TEXT NOT NULL,
    word_limit INTEGER,
    feedback TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_FEEDBACK_NOTES: &str = r#"
CREATE TABLE IF NOT EXISTS feedback_notes (
    id UUID PRIMARY KEY,
    message TEXT NOT NULL,
    client_addr TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_roadmaps_user ON roadmaps (user_id, created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_essays_user ON essays (user_id, created_at DESC)",
];

/// Creates the application tables if they do not exist yet.
/// Idempotent; runs on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_ROADMAPS).execute(pool).await?;
    sqlx::query(CREATE_ESSAYS).execute(pool).await?;
    sqlx::query(CREATE_FEEDBACK_NOTES).execute(pool).await?;
    for stmt in CREATE_INDEXES {
        sqlx::query(stmt).execute(pool).await?;
    }

    info!("Database schema ensured");
    Ok(())
}
