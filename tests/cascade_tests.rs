// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Deletion cascades for users and teams.

use axum::http::{Method, StatusCode};
use octofit_tracker::models::{Activity, LeaderboardEntry, Team, User};
use octofit_tracker::services::{teams, users};
use serde_json::{json, Value};

mod common;
use common::{create_team, create_user, get, log_activity, post, send};

async fn delete(app: &axum::Router, uri: &str) -> StatusCode {
    send(app, Method::DELETE, uri, None).await.0
}

#[tokio::test]
async fn test_delete_user_removes_activities_and_entries() {
    let (app, state) = common::create_test_app();
    let alice = create_user(&app, "alice").await;
    let bob = create_user(&app, "bob").await;
    log_activity(&app, &alice, 100).await;
    log_activity(&app, &alice, 200).await;
    log_activity(&app, &bob, 300).await;
    post(&app, "/api/leaderboard", json!({ "user": alice, "rank": 1 })).await;
    post(&app, "/api/leaderboard", json!({ "user": bob, "rank": 2 })).await;

    assert_eq!(
        delete(&app, &format!("/api/users/{}", alice)).await,
        StatusCode::NO_CONTENT
    );

    let (status, _) = get(&app, &format!("/api/users/{}", alice)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let activities: Vec<Activity> = state.db.list().await.unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].user_id, bob);

    let entries: Vec<LeaderboardEntry> = state.db.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_id, bob);
}

#[tokio::test]
async fn test_delete_user_removes_created_teams() {
    let (app, state) = common::create_test_app();
    let alice = create_user(&app, "alice").await;
    let bob = create_user(&app, "bob").await;
    let red = create_team(&app, "Red", &alice).await;
    post(&app, &format!("/api/teams/{}/join", red), json!({ "user_id": bob })).await;
    post(
        &app,
        "/api/leaderboard",
        json!({ "user": bob, "team": red, "rank": 1 }),
    )
    .await;

    let deleted = users::delete_user(&state.db, &alice).await.unwrap();
    assert_eq!(deleted.teams, 1);
    assert_eq!(deleted.leaderboard_entries, 1);
    assert_eq!(deleted.activities, 0);

    let teams: Vec<Team> = state.db.list().await.unwrap();
    assert!(teams.is_empty());

    // Members survive without a team
    let bob_user: User = state.db.fetch("User", &bob).await.unwrap();
    assert_eq!(bob_user.team_id, None);
}

#[tokio::test]
async fn test_delete_team_releases_members() {
    let (app, state) = common::create_test_app();
    let alice = create_user(&app, "alice").await;
    let bob = create_user(&app, "bob").await;
    let carol = create_user(&app, "carol").await;
    let red = create_team(&app, "Red", &alice).await;
    for member in [&bob, &carol] {
        post(&app, &format!("/api/teams/{}/join", red), json!({ "user_id": member })).await;
    }
    post(
        &app,
        "/api/leaderboard",
        json!({ "user": bob, "team": red, "rank": 1 }),
    )
    .await;
    post(&app, "/api/leaderboard", json!({ "user": carol, "rank": 2 })).await;

    let deleted = teams::delete_team(&state.db, &red).await.unwrap();
    assert_eq!(deleted.members_released, 2);
    assert_eq!(deleted.leaderboard_entries, 1);

    for member in [&bob, &carol] {
        let (status, body) = get(&app, &format!("/api/users/{}", member)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["team"], Value::Null);
    }

    let entries: Vec<LeaderboardEntry> = state.db.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_id, carol);
}

#[tokio::test]
async fn test_delete_team_over_http() {
    let (app, _state) = common::create_test_app();
    let alice = create_user(&app, "alice").await;
    let red = create_team(&app, "Red", &alice).await;

    assert_eq!(
        delete(&app, &format!("/api/teams/{}", red)).await,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        delete(&app, &format!("/api/teams/{}", red)).await,
        StatusCode::NOT_FOUND
    );

    // The creator is untouched
    let (status, _) = get(&app, &format!("/api/users/{}", alice)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_missing_user() {
    let (app, _state) = common::create_test_app();
    assert_eq!(delete(&app, "/api/users/missing").await, StatusCode::NOT_FOUND);
}
