// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diet plan and daily schedule, materialized on first request.

use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{DailySchedule, DietPlan};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/diet-plan", get(get_diet_plan))
        .route("/daily-schedule", get(get_daily_schedule))
}

async fn get_diet_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<DietPlan>> {
    let plan = state.recommendations.diet_plan(&auth.user.id).await?;
    Ok(Json(plan))
}

async fn get_daily_schedule(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<DailySchedule>> {
    let schedule = state.recommendations.daily_schedule(&auth.user.id).await?;
    Ok(Json(schedule))
}
