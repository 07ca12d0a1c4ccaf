// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static recommendation tables keyed by Prakriti type, and the
//! materialize-once lookup that turns them into per-user records.

use chrono::Utc;
use uuid::Uuid;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{DailySchedule, DietPlan, Dosha, ScheduleActivity};

/// Diet recommendations for one type.
pub struct DietEntry {
    pub recommended_foods: &'static [&'static str],
    pub avoid_foods: &'static [&'static str],
    /// (meal, time range)
    pub meal_timings: &'static [(&'static str, &'static str)],
    pub seasonal_tips: &'static [&'static str],
}

/// Daily routine for one type.
pub struct ScheduleEntry {
    pub wake_time: &'static str,
    pub sleep_time: &'static str,
    /// (time, activity), in time-of-day order
    pub activities: &'static [(&'static str, &'static str)],
}

const VATA_DIET: DietEntry = DietEntry {
    recommended_foods: &[
        "Warm, cooked foods",
        "Root vegetables",
        "Nuts and seeds",
        "Ghee and oils",
        "Sweet fruits",
        "Warm milk",
        "Rice and wheat",
    ],
    avoid_foods: &[
        "Cold foods",
        "Raw vegetables",
        "Dry foods",
        "Beans (except mung)",
        "Caffeine",
        "Carbonated drinks",
    ],
    meal_timings: &[
        ("breakfast", "7:00-8:00 AM"),
        ("lunch", "12:00-1:00 PM"),
        ("dinner", "6:00-7:00 PM"),
    ],
    seasonal_tips: &[
        "Eat warm, nourishing soups in winter",
        "Favor sweet, sour, and salty tastes",
        "Stay hydrated with warm water",
    ],
};

const PITTA_DIET: DietEntry = DietEntry {
    recommended_foods: &[
        "Cool, refreshing foods",
        "Sweet fruits",
        "Leafy greens",
        "Cucumber",
        "Coconut",
        "Dairy products",
        "Barley and oats",
    ],
    avoid_foods: &[
        "Spicy foods",
        "Citrus fruits",
        "Tomatoes",
        "Fermented foods",
        "Red meat",
        "Alcohol",
        "Fried foods",
    ],
    meal_timings: &[
        ("breakfast", "7:30-8:30 AM"),
        ("lunch", "12:00-1:00 PM"),
        ("dinner", "6:30-7:30 PM"),
    ],
    seasonal_tips: &[
        "Eat cooling foods in summer",
        "Favor sweet, bitter, and astringent tastes",
        "Avoid eating when angry or stressed",
    ],
};

const KAPHA_DIET: DietEntry = DietEntry {
    recommended_foods: &[
        "Light, warm foods",
        "Bitter vegetables",
        "Legumes",
        "Spices (ginger, turmeric)",
        "Honey",
        "Quinoa and millet",
        "Apples and pears",
    ],
    avoid_foods: &[
        "Heavy, oily foods",
        "Dairy products",
        "Sweet fruits",
        "Wheat",
        "Cold foods",
        "Excessive salt",
    ],
    meal_timings: &[
        ("breakfast", "7:00-8:00 AM (light)"),
        ("lunch", "12:00-1:00 PM (main meal)"),
        ("dinner", "6:00-6:30 PM (light)"),
    ],
    seasonal_tips: &[
        "Eat lighter meals in spring",
        "Favor pungent, bitter, and astringent tastes",
        "Skip breakfast if not hungry",
    ],
};

const VATA_SCHEDULE: ScheduleEntry = ScheduleEntry {
    wake_time: "6:00 AM",
    sleep_time: "10:00 PM",
    activities: &[
        ("6:00 AM", "Wake up, drink warm water"),
        ("6:30 AM", "Oil massage (Abhyanga) with sesame oil"),
        ("7:00 AM", "Gentle yoga and meditation (20 mins)"),
        ("8:00 AM", "Warm breakfast"),
        ("12:00 PM", "Main meal of the day"),
        ("3:00 PM", "Short walk or light activity"),
        ("6:30 PM", "Light dinner"),
        ("9:00 PM", "Relaxation routine, herbal tea"),
        ("10:00 PM", "Bedtime"),
    ],
};

const PITTA_SCHEDULE: ScheduleEntry = ScheduleEntry {
    wake_time: "5:30 AM",
    sleep_time: "10:30 PM",
    activities: &[
        ("5:30 AM", "Wake up, drink cool water"),
        ("6:00 AM", "Coconut oil massage"),
        ("6:30 AM", "Moderate yoga and breathing exercises"),
        ("8:00 AM", "Nourishing breakfast"),
        ("12:00 PM", "Lunch (largest meal)"),
        ("4:00 PM", "Cooling walk in nature"),
        ("7:00 PM", "Light dinner"),
        ("9:30 PM", "Calming activities, avoid screens"),
        ("10:30 PM", "Bedtime"),
    ],
};

const KAPHA_SCHEDULE: ScheduleEntry = ScheduleEntry {
    wake_time: "5:00 AM",
    sleep_time: "10:00 PM",
    activities: &[
        ("5:00 AM", "Wake up, drink warm ginger water"),
        ("5:30 AM", "Vigorous exercise or yoga (30-40 mins)"),
        ("7:00 AM", "Dry brushing and warm shower"),
        ("8:00 AM", "Light breakfast (optional)"),
        ("12:00 PM", "Main meal with spices"),
        ("3:00 PM", "Active movement or brisk walk"),
        ("6:00 PM", "Very light dinner"),
        ("9:00 PM", "Light reading or relaxation"),
        ("10:00 PM", "Bedtime"),
    ],
};

pub fn diet_entry(dosha: Dosha) -> &'static DietEntry {
    match dosha {
        Dosha::Vata => &VATA_DIET,
        Dosha::Pitta => &PITTA_DIET,
        Dosha::Kapha => &KAPHA_DIET,
    }
}

pub fn schedule_entry(dosha: Dosha) -> &'static ScheduleEntry {
    match dosha {
        Dosha::Vata => &VATA_SCHEDULE,
        Dosha::Pitta => &PITTA_SCHEDULE,
        Dosha::Kapha => &KAPHA_SCHEDULE,
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build a fresh diet plan record from the catalog.
pub fn build_diet_plan(user_id: &str, dosha: Dosha) -> DietPlan {
    let entry = diet_entry(dosha);
    DietPlan {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        prakriti_type: dosha,
        recommended_foods: owned(entry.recommended_foods),
        avoid_foods: owned(entry.avoid_foods),
        meal_timings: entry
            .meal_timings
            .iter()
            .map(|(meal, time)| (meal.to_string(), time.to_string()))
            .collect(),
        seasonal_tips: owned(entry.seasonal_tips),
        created_at: Utc::now(),
    }
}

/// Build a fresh daily schedule record from the catalog.
pub fn build_daily_schedule(user_id: &str, dosha: Dosha) -> DailySchedule {
    let entry = schedule_entry(dosha);
    DailySchedule {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        prakriti_type: dosha,
        wake_time: entry.wake_time.to_string(),
        sleep_time: entry.sleep_time.to_string(),
        activities: entry
            .activities
            .iter()
            .map(|(time, activity)| ScheduleActivity {
                time: time.to_string(),
                activity: activity.to_string(),
            })
            .collect(),
        created_at: Utc::now(),
    }
}

/// Recommendation lookups backed by the database.
#[derive(Clone)]
pub struct RecommendationService {
    db: FirestoreDb,
}

impl RecommendationService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// The user's classification, or `ClassificationRequired`.
    async fn classified_type(&self, user_id: &str) -> Result<Dosha> {
        self.db
            .get_profile(user_id)
            .await?
            .and_then(|profile| profile.prakriti_type)
            .ok_or(AppError::ClassificationRequired)
    }

    /// Return the stored diet plan, materializing it on first request.
    pub async fn diet_plan(&self, user_id: &str) -> Result<DietPlan> {
        let dosha = self.classified_type(user_id).await?;

        if let Some(plan) = self.db.get_diet_plan(user_id).await? {
            return Ok(plan);
        }

        tracing::info!(user_id, prakriti_type = %dosha, "Materializing diet plan");
        self.db
            .create_diet_plan(&build_diet_plan(user_id, dosha))
            .await
    }

    /// Return the stored daily schedule, materializing it on first request.
    pub async fn daily_schedule(&self, user_id: &str) -> Result<DailySchedule> {
        let dosha = self.classified_type(user_id).await?;

        if let Some(schedule) = self.db.get_daily_schedule(user_id).await? {
            return Ok(schedule);
        }

        tracing::info!(user_id, prakriti_type = %dosha, "Materializing daily schedule");
        self.db
            .create_daily_schedule(&build_daily_schedule(user_id, dosha))
            .await
    }
}
