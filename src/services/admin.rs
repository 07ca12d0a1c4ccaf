// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregate counts and per-user detail for the admin views.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Dosha, DoshaCounts, FollowUp, User, UserProfile};

/// Cap on the user listing.
pub const MAX_LISTED_USERS: u32 = 1000;
/// Follow-ups included in a user's detail view.
pub const DETAIL_FOLLOW_UPS: u32 = 50;

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AdminStats {
    pub total_users: u64,
    /// Profiles carrying a classification
    pub profiles_completed: u64,
    pub total_follow_ups: u64,
    pub prakriti_distribution: DoshaCounts,
}

#[derive(Debug, Serialize)]
pub struct UserDetails {
    pub user: User,
    pub profile: Option<UserProfile>,
    /// Most recent first
    pub follow_ups: Vec<FollowUp>,
}

/// Totals and the per-type classification distribution.
///
/// Every figure is a count query; no documents are listed.
pub async fn compute_stats(db: &FirestoreDb) -> Result<AdminStats> {
    let (total_users, total_follow_ups, vata, pitta, kapha) = tokio::try_join!(
        db.count_users(),
        db.count_follow_ups(),
        db.count_profiles_by_type(Dosha::Vata),
        db.count_profiles_by_type(Dosha::Pitta),
        db.count_profiles_by_type(Dosha::Kapha)
    )?;

    let prakriti_distribution = DoshaCounts {
        vata: u32::try_from(vata).unwrap_or(u32::MAX),
        pitta: u32::try_from(pitta).unwrap_or(u32::MAX),
        kapha: u32::try_from(kapha).unwrap_or(u32::MAX),
    };

    Ok(AdminStats {
        total_users,
        profiles_completed: vata + pitta + kapha,
        total_follow_ups,
        prakriti_distribution,
    })
}

pub async fn user_details(db: &FirestoreDb, user_id: &str) -> Result<UserDetails> {
    let user = db.get_user(user_id).await?.ok_or(AppError::UserNotFound)?;

    let (profile, follow_ups) = tokio::try_join!(
        db.get_profile(user_id),
        db.list_follow_ups(user_id, DETAIL_FOLLOW_UPS)
    )?;

    Ok(UserDetails {
        user,
        profile,
        follow_ups,
    })
}
