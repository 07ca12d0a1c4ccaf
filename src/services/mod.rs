// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod admin;
pub mod catalog;
pub mod insight;
pub mod login_exchange;
pub mod questionnaire;
pub mod session;

pub use catalog::RecommendationService;
pub use insight::InsightService;
pub use login_exchange::{ExternalSession, LoginExchangeClient};
pub use session::SessionService;
