// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Questionnaire inventory and submission.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::PrakritiAnalysis;
use crate::services::questionnaire::{score_answers, Question, QUESTIONS};
use crate::AppState;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/prakriti/questions", get(get_questions))
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/prakriti/analyze", post(analyze))
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    /// Question id to the selected option text
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

async fn get_questions() -> Json<&'static [Question]> {
    Json(&QUESTIONS)
}

/// Score the answers, fetch commentary, and store the result on the profile.
///
/// Nothing is stored if the completion service fails.
async fn analyze(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<PrakritiAnalysis>> {
    let scores = score_answers(&request.answers);
    let prakriti_type = scores.primary();

    let ai_insights = state.insights.generate(&scores, prakriti_type).await?;

    let analysis = PrakritiAnalysis {
        prakriti_type,
        scores,
        ai_insights,
        analyzed_at: Utc::now(),
    };
    state
        .db
        .save_prakriti_analysis(&auth.user.id, &analysis)
        .await?;

    Ok(Json(analysis))
}
