// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{extract::State, routing::get, Extension, Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{ProfileUpdate, UserProfile};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

#[derive(Serialize)]
pub struct ProfileUpdateResponse {
    pub success: bool,
    pub profile: UserProfile,
}

/// The caller's profile, created empty on first access.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state.db.get_or_create_profile(&auth.user.id).await?;
    Ok(Json(profile))
}

/// Merge the provided profile fields. Fields not in the body are untouched.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileUpdateResponse>> {
    update.validate()?;

    let mut profile = state
        .db
        .get_profile(&auth.user.id)
        .await?
        .unwrap_or_else(|| UserProfile::empty(&auth.user.id));

    let fields = update.apply_to(&mut profile);
    profile.updated_at = Utc::now();
    state.db.merge_profile(&profile, &fields).await?;

    tracing::debug!(user_id = %auth.user.id, ?fields, "Profile updated");

    Ok(Json(ProfileUpdateResponse {
        success: true,
        profile,
    }))
}
