// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.

use crate::error::AppError;
use crate::models::User;
use crate::services::session::SESSION_TTL_DAYS;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session_token";

/// Authenticated caller, inserted into request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    /// The bearer token that authenticated this request
    pub token: String,
}

/// Find the session token: cookie first, then `Authorization: Bearer`.
pub fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Session cookie: http-only, secure, cross-site, 7 days, root path.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .path("/")
        .build()
}

/// Expired, empty session cookie with the same attributes as
/// [`session_cookie`], so browsers overwrite it.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::ZERO)
        .path("/")
        .build()
}

/// Middleware that requires a valid, unexpired session.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&jar, request.headers()).ok_or(AppError::Unauthenticated)?;
    let user = state.sessions.authenticate(&token).await?;

    request.extensions_mut().insert(AuthUser { user, token });

    Ok(next.run(request).await)
}

/// Middleware for `/admin/*`. Must run after [`require_auth`].
///
/// With no `ADMIN_EMAILS` configured every authenticated user passes.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.config.admin_restricted() {
        let email = auth.user.email.to_lowercase();
        if !state.config.admin_emails.contains(&email) {
            tracing::warn!(user_id = %auth.user.id, "Blocked admin request from non-admin user");
            return Err(AppError::Forbidden);
        }
    }

    Ok(next.run(request).await)
}
