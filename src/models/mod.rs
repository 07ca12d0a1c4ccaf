// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod follow_up;
pub mod plan;
pub mod prakriti;
pub mod profile;
pub mod user;

pub use follow_up::{FollowUp, NewFollowUp};
pub use plan::{DailySchedule, DietPlan, ScheduleActivity};
pub use prakriti::{Dosha, DoshaCounts, PrakritiAnalysis};
pub use profile::{ProfileUpdate, UserProfile};
pub use user::{Session, User};
