// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use octofit_tracker::config::Config;
use octofit_tracker::db::Datastore;
use octofit_tracker::routes::create_router;
use octofit_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> Datastore {
    Datastore::firestore("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::default(),
        db: Datastore::in_memory(),
    });

    (create_router(state.clone()), state)
}

/// Send one request through the router and decode the JSON response.
///
/// Empty bodies (204) decode as `Value::Null`.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[allow(dead_code)]
pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

#[allow(dead_code)]
pub async fn post(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

/// Create a user and return its id.
#[allow(dead_code)]
pub async fn create_user(app: &axum::Router, username: &str) -> String {
    let (status, body) = post(
        app,
        "/api/users",
        serde_json::json!({ "username": username, "email": format!("{}@example.com", username) }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create user: {}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Create a team and return its id.
#[allow(dead_code)]
pub async fn create_team(app: &axum::Router, name: &str, created_by: &str) -> String {
    let (status, body) = post(
        app,
        "/api/teams",
        serde_json::json!({ "name": name, "created_by": created_by }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create team: {}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Log an activity dated now and return its id.
#[allow(dead_code)]
pub async fn log_activity(app: &axum::Router, user: &str, calories: u32) -> String {
    let (status, body) = post(
        app,
        "/api/activities",
        serde_json::json!({
            "user": user,
            "activity_type": "running",
            "duration": 30,
            "calories_burned": calories,
            "distance": 5.0,
            "date": chrono::Utc::now().to_rfc3339(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "log activity: {}", body);
    body["id"].as_str().unwrap().to_string()
}
