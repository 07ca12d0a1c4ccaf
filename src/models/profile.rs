// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model and the allow-listed update payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Dosha, PrakritiAnalysis};

/// Profile stored in Firestore, keyed by `user_id`.
///
/// Every field defaults so that partially-written documents still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub lifestyle: Option<String>,
    #[serde(default)]
    pub health_concerns: Vec<String>,
    /// Set only by questionnaire submission
    #[serde(default)]
    pub prakriti_type: Option<Dosha>,
    #[serde(default)]
    pub prakriti_analysis: Option<PrakritiAnalysis>,
    #[serde(default = "Utc::now", with = "crate::time_utils::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Empty profile for a user who has not filled anything in yet.
    pub fn empty(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            age: None,
            gender: None,
            contact: None,
            body_type: None,
            lifestyle: None,
            health_concerns: Vec::new(),
            prakriti_type: None,
            prakriti_analysis: None,
            updated_at: Utc::now(),
        }
    }
}

/// Fields a user may change through `PUT /profile`.
///
/// Absent (or `null`) fields are left untouched. Classification fields are
/// deliberately not accepted here.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdate {
    #[validate(range(min = 1, max = 150))]
    pub age: Option<u32>,
    #[validate(length(max = 50))]
    pub gender: Option<String>,
    #[validate(length(max = 100))]
    pub contact: Option<String>,
    #[validate(length(max = 100))]
    pub body_type: Option<String>,
    #[validate(length(max = 100))]
    pub lifestyle: Option<String>,
    #[validate(length(max = 20))]
    pub health_concerns: Option<Vec<String>>,
}

impl ProfileUpdate {
    /// Apply provided fields to `profile`, returning the document paths written.
    pub fn apply_to(self, profile: &mut UserProfile) -> Vec<&'static str> {
        let mut fields = Vec::new();

        if let Some(age) = self.age {
            profile.age = Some(age);
            fields.push("age");
        }
        if let Some(gender) = self.gender {
            profile.gender = Some(gender);
            fields.push("gender");
        }
        if let Some(contact) = self.contact {
            profile.contact = Some(contact);
            fields.push("contact");
        }
        if let Some(body_type) = self.body_type {
            profile.body_type = Some(body_type);
            fields.push("body_type");
        }
        if let Some(lifestyle) = self.lifestyle {
            profile.lifestyle = Some(lifestyle);
            fields.push("lifestyle");
        }
        if let Some(concerns) = self.health_concerns {
            profile.health_concerns = concerns;
            fields.push("health_concerns");
        }

        fields
    }
}
