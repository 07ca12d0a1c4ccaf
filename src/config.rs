//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup; `.env` is honoured for local development.

use std::env;

/// Default session-data endpoint of the external login provider.
pub const DEFAULT_SESSION_EXCHANGE_URL: &str =
    "https://demobackend.emergentagent.com/auth/v1/env/oauth/session-data";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Server port
    pub port: u16,
    /// GCP project holding the Firestore database
    pub gcp_project_id: String,
    /// Firestore database name
    pub firestore_database: String,
    /// Endpoint that exchanges a login session id for user data
    pub session_exchange_url: String,
    /// Base URL of the OpenAI-compatible completion service
    pub llm_base_url: String,
    /// Model used for Prakriti insights
    pub llm_model: String,
    /// Allowed cross-origin list. `*` mirrors any origin.
    pub cors_origins: Vec<String>,
    /// Emails allowed on `/admin/*`. Empty means any authenticated user.
    pub admin_emails: Vec<String>,

    // --- Secrets ---
    /// API key for the completion service
    pub llm_api_key: String,
}

impl Config {
    /// Deterministic configuration for tests.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            gcp_project_id: "test-project".to_string(),
            firestore_database: "(default)".to_string(),
            session_exchange_url: "http://127.0.0.1:9/session-data".to_string(),
            llm_base_url: "http://127.0.0.1:9/v1".to_string(),
            llm_model: "gpt-4o-mini".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            admin_emails: Vec::new(),
            llm_api_key: "test_llm_key".to_string(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            firestore_database: env::var("FIRESTORE_DATABASE")
                .unwrap_or_else(|_| "(default)".to_string()),
            session_exchange_url: env::var("SESSION_EXCHANGE_URL")
                .unwrap_or_else(|_| DEFAULT_SESSION_EXCHANGE_URL.to_string()),
            llm_base_url: env::var("LLM_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            cors_origins: split_list(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string())),
            admin_emails: split_list(&env::var("ADMIN_EMAILS").unwrap_or_default())
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),

            llm_api_key: env::var("LLM_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("LLM_API_KEY"))?,
        })
    }

    /// Whether the admin allow-list is active.
    pub fn admin_restricted(&self) -> bool {
        !self.admin_emails.is_empty()
    }
}

/// Split a comma-separated variable, dropping blanks.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
