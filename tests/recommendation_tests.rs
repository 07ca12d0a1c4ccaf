// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diet plan and daily schedule materialization.

use axum::http::{Method, StatusCode};
use chrono::Utc;
use prakriti_wellness::models::{Dosha, DoshaCounts, PrakritiAnalysis};
use prakriti_wellness::AppState;
use tower::ServiceExt;

mod common;

async fn classify(state: &AppState, user_id: &str, dosha: Dosha) {
    let mut scores = DoshaCounts::default();
    for _ in 0..10 {
        scores.increment(dosha);
    }
    state
        .db
        .save_prakriti_analysis(
            user_id,
            &PrakritiAnalysis {
                prakriti_type: dosha,
                scores,
                ai_insights: "seeded".to_string(),
                analyzed_at: Utc::now(),
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_diet_plan_requires_classification() {
    let (app, state) = common::create_test_app();
    let (_, token) = common::signed_in_user(&state, "u-new").await;

    for uri in ["/api/diet-plan", "/api/daily-schedule"] {
        let response = app
            .clone()
            .oneshot(common::api_request(Method::GET, uri, Some(&token), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(
            common::body_json(response).await["error"],
            "classification_required"
        );
    }
}

#[tokio::test]
async fn test_unclassified_profile_still_requires_classification() {
    let (app, state) = common::create_test_app();
    let (user, token) = common::signed_in_user(&state, "u-profile-only").await;
    state.db.get_or_create_profile(&user.id).await.unwrap();

    let response = app
        .oneshot(common::api_request(
            Method::GET,
            "/api/diet-plan",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_diet_plan_materialized_once() {
    let (app, state) = common::create_test_app();
    let (user, token) = common::signed_in_user(&state, "u-diet").await;
    classify(&state, &user.id, Dosha::Kapha).await;

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(common::api_request(
                Method::GET,
                "/api/diet-plan",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(common::body_bytes(response).await);
    }

    assert_eq!(bodies[0], bodies[1]);
    let plan: serde_json::Value = serde_json::from_slice(&bodies[0]).unwrap();
    assert_eq!(plan["prakriti_type"], "Kapha");
    assert_eq!(plan["user_id"], user.id.as_str());
    assert!(plan["recommended_foods"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f == "Honey"));
    assert_eq!(plan["meal_timings"]["dinner"], "6:00-6:30 PM (light)");
}

#[tokio::test]
async fn test_materialized_plan_survives_reclassification() {
    let (app, state) = common::create_test_app();
    let (user, token) = common::signed_in_user(&state, "u-switch").await;
    classify(&state, &user.id, Dosha::Vata).await;

    let first = app
        .clone()
        .oneshot(common::api_request(
            Method::GET,
            "/api/diet-plan",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let first = common::body_bytes(first).await;

    classify(&state, &user.id, Dosha::Pitta).await;

    let second = app
        .oneshot(common::api_request(
            Method::GET,
            "/api/diet-plan",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let second = common::body_bytes(second).await;

    assert_eq!(first, second);
    let plan: serde_json::Value = serde_json::from_slice(&second).unwrap();
    assert_eq!(plan["prakriti_type"], "Vata");
}

#[tokio::test]
async fn test_daily_schedule_materialized_once() {
    let (app, state) = common::create_test_app();
    let (user, token) = common::signed_in_user(&state, "u-sched").await;
    classify(&state, &user.id, Dosha::Pitta).await;

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(common::api_request(
                Method::GET,
                "/api/daily-schedule",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(common::body_bytes(response).await);
    }

    assert_eq!(bodies[0], bodies[1]);
    let schedule: serde_json::Value = serde_json::from_slice(&bodies[0]).unwrap();
    assert_eq!(schedule["wake_time"], "5:30 AM");
    assert_eq!(schedule["sleep_time"], "10:30 PM");
    assert_eq!(schedule["activities"].as_array().unwrap().len(), 9);
    assert_eq!(schedule["activities"][0]["activity"], "Wake up, drink cool water");
}

#[tokio::test]
async fn test_concurrent_requests_share_one_plan() {
    let (app, state) = common::create_test_app();
    let (user, token) = common::signed_in_user(&state, "u-race").await;
    classify(&state, &user.id, Dosha::Vata).await;

    let requests = (0..8).map(|_| {
        let app = app.clone();
        let token = token.clone();
        tokio::spawn(async move {
            let response = app
                .oneshot(common::api_request(
                    Method::GET,
                    "/api/diet-plan",
                    Some(&token),
                    None,
                ))
                .await
                .unwrap();
            common::body_json(response).await["id"]
                .as_str()
                .unwrap()
                .to_string()
        })
    });

    let mut ids = Vec::new();
    for handle in requests.collect::<Vec<_>>() {
        ids.push(handle.await.unwrap());
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
}
