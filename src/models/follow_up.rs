// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Follow-up log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Append-only progress entry (document ID is `id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: String,
    pub user_id: String,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub progress_rating: Option<u8>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /follow-ups`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct NewFollowUp {
    /// RFC3339 or `YYYY-MM-DD`; defaults to now
    pub date: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub progress_rating: Option<u8>,
    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
}
