// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login completion, current user and logout.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{removal_cookie, session_cookie, AuthUser};
use crate::models::User;
use crate::AppState;

/// Routes reachable without a session.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/session", get(create_session))
}

/// Routes that require a session (auth middleware applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(get_me))
        .route("/auth/logout", post(logout))
}

#[derive(Deserialize)]
pub struct SessionParams {
    session_id: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub success: bool,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Exchange the login provider's session id for our session cookie.
async fn create_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<SessionParams>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let session_id = params.session_id.trim();
    if session_id.is_empty() {
        return Err(AppError::BadRequest("session_id is required".to_string()));
    }

    let (user, token) = state.sessions.login(session_id).await?;

    Ok((
        jar.add(session_cookie(token)),
        Json(LoginResponse {
            user,
            success: true,
        }),
    ))
}

async fn get_me(Extension(auth): Extension<AuthUser>) -> Json<User> {
    Json(auth.user)
}

/// Delete the current session and clear the cookie.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SuccessResponse>)> {
    state.sessions.logout(&auth.token).await?;
    tracing::info!(user_id = %auth.user.id, "User logged out");

    Ok((
        jar.add(removal_cookie()),
        Json(SuccessResponse { success: true }),
    ))
}
