// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Duration, Utc};
use prakriti_wellness::config::Config;
use prakriti_wellness::db::FirestoreDb;
use prakriti_wellness::models::{Session, User};
use prakriti_wellness::routes::create_router;
use prakriti_wellness::services::session::token_key;
use prakriti_wellness::AppState;
use serde_json::{json, Value};
use std::sync::Arc;

/// Canned commentary returned by the fake completion service.
#[allow(dead_code)]
pub const FAKE_INSIGHT: &str = "Your constitution is light and quick.";

/// Session id the fake login provider refuses.
#[allow(dead_code)]
pub const REJECTED_SESSION_ID: &str = "rejected";

/// Session id for which the fake login provider always reports
/// [`STABLE_PROVIDER_ID`], whatever email it returns.
#[allow(dead_code)]
pub const STABLE_ID_SESSION: &str = "renamed";

#[allow(dead_code)]
pub const STABLE_PROVIDER_ID: &str = "ext-fixed";

/// Text only the fake login provider knows; must never reach clients.
#[allow(dead_code)]
pub const UPSTREAM_SECRET: &str = "internal-provider-trace-7f3a";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project", "(default)")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build the app around `config` with an in-memory database.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, FirestoreDb::new_in_memory()));
    (create_router(state.clone()), state)
}

/// Create a test app with an in-memory database.
/// External services point at a closed port.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

/// Create a test app whose login provider and completion service are a
/// local fake.
#[allow(dead_code)]
pub async fn create_test_app_with_upstream() -> (Router, Arc<AppState>) {
    let base = spawn_fake_upstream().await;
    let mut config = Config::test_default();
    config.session_exchange_url = format!("{}/session-data", base);
    config.llm_base_url = format!("{}/v1", base);
    create_test_app_with(config)
}

/// Fake login provider: the session id names the user (`alice` logs in as
/// `alice@example.com`). Each exchange issues a fresh token and, except for
/// [`STABLE_ID_SESSION`], a fresh provider-side id.
async fn fake_session_data(headers: HeaderMap) -> Response {
    let session_id = headers
        .get("X-Session-ID")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if session_id.is_empty() || session_id == REJECTED_SESSION_ID {
        return (
            StatusCode::UNAUTHORIZED,
            format!("session lookup failed: {}", UPSTREAM_SECRET),
        )
            .into_response();
    }

    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let id = if session_id == STABLE_ID_SESSION {
        STABLE_PROVIDER_ID.to_string()
    } else {
        format!("ext-{}-{}", session_id, &nonce[..8])
    };
    Json(json!({
        "id": id,
        "email": format!("{}@example.com", session_id),
        "name": session_id,
        "picture": null,
        "session_token": format!("tok-{}", nonce),
    }))
    .into_response()
}

/// Fake completion service; requires the configured API key.
async fn fake_chat_completions(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        == Some("Bearer test_llm_key");
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let prompt_ok = body["messages"][1]["content"]
        .as_str()
        .is_some_and(|c| c.contains("Primary Dosha:"));
    if !prompt_ok {
        return StatusCode::BAD_REQUEST.into_response();
    }

    Json(json!({
        "choices": [{"message": {"role": "assistant", "content": FAKE_INSIGHT}}]
    }))
    .into_response()
}

/// Start the fake upstream on an ephemeral port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_fake_upstream() -> String {
    let app = Router::new()
        .route("/session-data", get(fake_session_data))
        .route("/v1/chat/completions", post(fake_chat_completions));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Store a user directly.
#[allow(dead_code)]
pub async fn seed_user(state: &AppState, id: &str, email: &str) -> User {
    let user = User {
        id: id.to_string(),
        email: email.to_string(),
        name: id.to_string(),
        picture: None,
        created_at: Utc::now(),
    };
    state.db.upsert_user(&user).await.unwrap();
    user
}

/// Store a session for `user_id` expiring after `ttl` and return its token.
#[allow(dead_code)]
pub async fn seed_session(state: &AppState, user_id: &str, ttl: Duration) -> String {
    let token = format!("test-token-{}", uuid::Uuid::new_v4());
    let now = Utc::now();
    state
        .db
        .insert_session(&Session {
            user_id: user_id.to_string(),
            token_hash: token_key(&token),
            expires_at: now + ttl,
            created_at: now,
        })
        .await
        .unwrap();
    token
}

/// Seed a user with a one-day session. Returns the user and token.
#[allow(dead_code)]
pub async fn signed_in_user(state: &AppState, id: &str) -> (User, String) {
    let user = seed_user(state, id, &format!("{}@example.com", id)).await;
    let token = seed_session(state, id, Duration::days(1)).await;
    (user, token)
}

/// Build a request, optionally with a bearer token and JSON body.
#[allow(dead_code)]
pub fn api_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as raw bytes.
#[allow(dead_code)]
pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

/// Answer every question with the option carrying `marker`.
#[allow(dead_code)]
pub fn answers_for(marker: &str) -> Value {
    let mut answers = serde_json::Map::new();
    for question in prakriti_wellness::services::questionnaire::QUESTIONS.iter() {
        let option = question
            .options
            .iter()
            .find(|o| o.contains(marker))
            .unwrap();
        answers.insert(question.id.to_string(), Value::String(option.to_string()));
    }
    json!({ "answers": answers })
}
