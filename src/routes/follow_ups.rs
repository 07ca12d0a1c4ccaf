// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress follow-ups.

use axum::{extract::State, routing::get, Extension, Json, Router};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{FollowUp, NewFollowUp};
use crate::time_utils::parse_flexible_date;
use crate::AppState;

/// Maximum follow-ups returned to the owner.
const MAX_FOLLOW_UPS: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/follow-ups", get(list_follow_ups).post(create_follow_up))
}

fn resolve_date(raw: Option<&str>, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(now),
        Some(raw) => parse_flexible_date(raw).ok_or_else(|| {
            AppError::BadRequest(
                "Invalid 'date': expected RFC3339 date-time or YYYY-MM-DD".to_string(),
            )
        }),
    }
}

/// The caller's follow-ups, most recent first.
async fn list_follow_ups(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<FollowUp>>> {
    let follow_ups = state
        .db
        .list_follow_ups(&auth.user.id, MAX_FOLLOW_UPS)
        .await?;
    Ok(Json(follow_ups))
}

async fn create_follow_up(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<NewFollowUp>,
) -> Result<Json<FollowUp>> {
    body.validate()?;

    let now = Utc::now();
    let follow_up = FollowUp {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: auth.user.id.clone(),
        date: resolve_date(body.date.as_deref(), now)?,
        notes: body.notes,
        progress_rating: body.progress_rating,
        feedback: body.feedback,
        created_at: now,
    };
    state.db.insert_follow_up(&follow_up).await?;

    tracing::debug!(user_id = %auth.user.id, follow_up_id = %follow_up.id, "Follow-up recorded");
    Ok(Json(follow_up))
}
