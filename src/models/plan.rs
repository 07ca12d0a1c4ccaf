// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Materialized recommendation records.
//!
//! Both records are built once from the static catalog and then served
//! verbatim from storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Dosha;

/// Per-user diet plan (document ID is `user_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    pub id: String,
    pub user_id: String,
    pub prakriti_type: Dosha,
    pub recommended_foods: Vec<String>,
    pub avoid_foods: Vec<String>,
    /// Meal slot (breakfast/lunch/dinner) to time range
    pub meal_timings: BTreeMap<String, String>,
    pub seasonal_tips: Vec<String>,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub created_at: DateTime<Utc>,
}

/// One entry of a daily routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleActivity {
    pub time: String,
    pub activity: String,
}

/// Per-user daily schedule (document ID is `user_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySchedule {
    pub id: String,
    pub user_id: String,
    pub prakriti_type: Dosha,
    pub wake_time: String,
    pub sleep_time: String,
    /// Ordered by time of day
    pub activities: Vec<ScheduleActivity>,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub created_at: DateTime<Utc>,
}
