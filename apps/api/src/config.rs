use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// CORS allow-list. Origins outside this list are rejected by the browser layer.
    pub allowed_origins: Vec<String>,
    /// Emails allowed to read the feedback inbox. Empty list means nobody.
    pub admin_emails: Vec<String>,
    /// Accept the fixed dev token instead of verifying against Supabase.
    /// Must never be set in production.
    pub dev_auth_bypass: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            supabase_url: require_env("SUPABASE_URL")?,
            supabase_anon_key: require_env("SUPABASE_ANON_KEY")?,
            allowed_origins: parse_csv(
                &std::env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:5177".to_string()),
            ),
            admin_emails: parse_csv(&std::env::var("ADMIN_EMAILS").unwrap_or_default()),
            dev_auth_bypass: parse_flag(std::env::var("DEV_AUTH_BYPASS").ok().as_deref()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("True")
    )
}
