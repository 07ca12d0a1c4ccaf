// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only admin views. Guarded by `require_auth` then `require_admin`.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::models::User;
use crate::services::admin::{self, AdminStats, UserDetails, MAX_LISTED_USERS};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/stats", get(get_stats))
        .route("/admin/user/{user_id}/details", get(get_user_details))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    let users = state.db.list_users(MAX_LISTED_USERS).await?;
    Ok(Json(users))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<AdminStats>> {
    let stats = admin::compute_stats(&state.db).await?;
    Ok(Json(stats))
}

async fn get_user_details(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserDetails>> {
    let details = admin::user_details(&state.db, &user_id).await?;
    Ok(Json(details))
}
