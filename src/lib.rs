// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Prakriti Wellness: constitution typing and daily recommendations
//!
//! This crate provides the backend API for user sessions, profiles, the
//! Prakriti questionnaire, generated insights, and the diet and schedule
//! recommendations derived from a user's type.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{InsightService, LoginExchangeClient, RecommendationService, SessionService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub sessions: SessionService,
    pub insights: InsightService,
    pub recommendations: RecommendationService,
}

impl AppState {
    /// Wire the services around a database handle.
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        let sessions = SessionService::new(
            db.clone(),
            LoginExchangeClient::new(config.session_exchange_url.clone()),
        );
        let insights = InsightService::new(
            config.llm_base_url.clone(),
            config.llm_api_key.clone(),
            config.llm_model.clone(),
        );
        let recommendations = RecommendationService::new(db.clone());

        Self {
            config,
            db,
            sessions,
            insights,
            recommendations,
        }
    }
}
