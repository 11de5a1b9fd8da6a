// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User endpoint tests against the in-memory store.

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::{create_team, create_user, get, log_activity, post, send};

#[tokio::test]
async fn test_create_and_get_user() {
    let (app, _state) = common::create_test_app();

    let (status, body) = post(
        &app,
        "/api/users",
        json!({
            "username": "alice",
            "email": "alice@example.com",
            "first_name": "Alice",
            "fitness_level": "intermediate",
            "goals": ["run a 10k"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["fitness_level"], "intermediate");
    assert_eq!(body["team"], serde_json::Value::Null);
    assert!(body["created_at"].as_str().unwrap().ends_with('Z'));

    let id = body["id"].as_str().unwrap();
    let (status, fetched) = get(&app, &format!("/api/users/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["goals"], json!(["run a 10k"]));
}

#[tokio::test]
async fn test_list_users() {
    let (app, _state) = common::create_test_app();
    create_user(&app, "alice").await;
    create_user(&app, "bob").await;

    let (status, body) = get(&app, "/api/users").await;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let (app, _state) = common::create_test_app();
    create_user(&app, "alice").await;

    let (status, body) = post(&app, "/api/users", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_invalid_user_input_rejected() {
    let (app, _state) = common::create_test_app();

    let (status, _) = post(&app, "/api/users", json!({ "username": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/users", json!({ "username": "has space" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/users",
        json!({ "username": "carol", "email": "not-an-email" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing required field
    let (status, body) = post(&app, "/api/users", json!({ "email": "x@example.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_create_user_with_unknown_team_is_not_found() {
    let (app, _state) = common::create_test_app();

    let (status, body) = post(
        &app,
        "/api/users",
        json!({ "username": "alice", "team": "no-such-team" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let (app, _state) = common::create_test_app();
    let (status, body) = get(&app, "/api/users/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_patch_user_keeps_other_fields() {
    let (app, _state) = common::create_test_app();
    let (_, created) = post(
        &app,
        "/api/users",
        json!({ "username": "alice", "bio": "runner", "first_name": "Alice" }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/users/{}", id),
        Some(json!({ "first_name": "Al", "bio": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Al");
    assert_eq!(body["bio"], serde_json::Value::Null);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_put_user_replaces_fields() {
    let (app, _state) = common::create_test_app();
    let (_, created) = post(
        &app,
        "/api/users",
        json!({ "username": "alice", "bio": "runner", "goals": ["5k"] }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", id),
        Some(json!({ "username": "alice2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["username"], "alice2");
    assert_eq!(body["bio"], serde_json::Value::Null);
    assert_eq!(body["goals"], json!([]));
}

#[tokio::test]
async fn test_rename_to_existing_username_rejected() {
    let (app, _state) = common::create_test_app();
    create_user(&app, "alice").await;
    let bob = create_user(&app, "bob").await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/users/{}", bob),
        Some(json!({ "username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Re-saving its own username is fine
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/users/{}", bob),
        Some(json!({ "username": "bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_team_name_resolved() {
    let (app, _state) = common::create_test_app();
    let alice = create_user(&app, "alice").await;
    let red = create_team(&app, "Red", &alice).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/users/{}", alice),
        Some(json!({ "team": red })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"], red.as_str());
    assert_eq!(body["team_name"], "Red");
}

#[tokio::test]
async fn test_user_stats_scenario() {
    let (app, _state) = common::create_test_app();
    let alice = create_user(&app, "alice").await;
    for calories in [100, 250, 50] {
        log_activity(&app, &alice, calories).await;
    }

    let (status, body) = get(&app, &format!("/api/users/{}/stats", alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"], alice.as_str());
    assert_eq!(body["period"], "all-time");
    assert_eq!(body["total_calories"], 400);
    assert_eq!(body["total_activities"], 3);
    assert_eq!(body["total_distance"], 15.0);
}

#[tokio::test]
async fn test_user_stats_without_activities_are_zero() {
    let (app, _state) = common::create_test_app();
    let alice = create_user(&app, "alice").await;

    let (status, body) = get(&app, &format!("/api/users/{}/stats?period=weekly", alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "weekly");
    assert_eq!(body["total_calories"], 0);
    assert_eq!(body["total_activities"], 0);
    assert_eq!(body["total_distance"], 0.0);
}

#[tokio::test]
async fn test_user_stats_errors() {
    let (app, _state) = common::create_test_app();
    let (status, _) = get(&app, "/api/users/missing/stats").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let alice = create_user(&app, "alice").await;
    let (status, body) = get(&app, &format!("/api/users/{}/stats?period=yearly", alice)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_user_activities() {
    let (app, _state) = common::create_test_app();
    let alice = create_user(&app, "alice").await;
    let bob = create_user(&app, "bob").await;
    log_activity(&app, &alice, 100).await;
    log_activity(&app, &bob, 200).await;

    let (status, body) = get(&app, &format!("/api/users/{}/activities", alice)).await;
    assert_eq!(status, StatusCode::OK);
    let activities = body.as_array().unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0]["user"], alice.as_str());
    assert_eq!(activities[0]["user_username"], "alice");

    let (status, _) = get(&app, "/api/users/missing/activities").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_trailing_slash_tolerated() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::{Layer, ServiceExt};
    use tower_http::normalize_path::NormalizePathLayer;

    let (app, _state) = common::create_test_app();
    create_user(&app, "alice").await;

    let app = NormalizePathLayer::trim_trailing_slash().layer(app);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_user_stats_empty_period_means_all_time() {
    let (app, _state) = common::create_test_app();
    let alice = create_user(&app, "alice").await;
    log_activity(&app, &alice, 120).await;

    let (status, body) = get(&app, &format!("/api/users/{}/stats?period=", alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "all-time");
    assert_eq!(body["total_calories"], 120);
}
