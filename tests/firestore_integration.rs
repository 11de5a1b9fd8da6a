// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running.
//! Run with: FIRESTORE_EMULATOR_HOST=localhost:8081 cargo test --test firestore_integration
//!
//! Every test uses fresh usernames so runs against a shared emulator do not collide.

use chrono::Utc;
use octofit_tracker::models::{
    Activity, LeaderboardEntry, NewActivity, NewTeam, NewUser, Period, User,
};
use octofit_tracker::services::{activities, leaderboard, teams, users};

mod common;
use common::test_db;

fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

fn new_user(username: &str) -> NewUser {
    serde_json::from_value(serde_json::json!({ "username": username })).unwrap()
}

fn new_activity(user: &str, calories: u32) -> NewActivity {
    NewActivity {
        user: user.to_string(),
        activity_type: "running".to_string(),
        duration: 30,
        calories_burned: calories,
        distance: Some(2.5),
        notes: None,
        date: Utc::now(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_roundtrip() {
    require_emulator!();

    let db = test_db().await;
    let user = users::create_user(&db, new_user(&unique_name("alice")))
        .await
        .unwrap();
    assert!(!user.id.is_empty());

    let fetched: Option<User> = db.get(&user.id).await.unwrap();
    let fetched = fetched.expect("user should exist");
    assert_eq!(fetched.username, user.username);
    assert_eq!(fetched.created_at.timestamp(), user.created_at.timestamp());

    let by_name: Vec<User> = db.query_eq("username", &user.username).await.unwrap();
    assert_eq!(by_name.len(), 1);
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    require_emulator!();

    let db = test_db().await;
    let name = unique_name("dup");
    users::create_user(&db, new_user(&name)).await.unwrap();
    assert!(users::create_user(&db, new_user(&name)).await.is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// AGGREGATION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_stats_and_refresh() {
    require_emulator!();

    let db = test_db().await;
    let user = users::create_user(&db, new_user(&unique_name("stats")))
        .await
        .unwrap();
    for calories in [100, 250, 50] {
        activities::create_activity(&db, new_activity(&user.id, calories))
            .await
            .unwrap();
    }

    let totals = leaderboard::user_stats(&db, &user.id, Period::AllTime, Utc::now())
        .await
        .unwrap();
    assert_eq!(totals.total_calories, 400);
    assert_eq!(totals.total_activities, 3);

    let entry = leaderboard::refresh_entry(&db, &user.id, Period::Weekly, Utc::now())
        .await
        .unwrap();
    assert_eq!(entry.total_calories, 400);
    assert_eq!(entry.rank, 0);

    let again = leaderboard::refresh_entry(&db, &user.id, Period::Weekly, Utc::now())
        .await
        .unwrap();
    assert_eq!(again.id, entry.id);
}

// ═══════════════════════════════════════════════════════════════════════════
// CASCADE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_delete_user_cascades() {
    require_emulator!();

    let db = test_db().await;
    let owner = users::create_user(&db, new_user(&unique_name("owner")))
        .await
        .unwrap();
    let member = users::create_user(&db, new_user(&unique_name("member")))
        .await
        .unwrap();
    let team = teams::create_team(
        &db,
        NewTeam {
            name: unique_name("team"),
            description: None,
            created_by: owner.id.clone(),
        },
    )
    .await
    .unwrap();
    teams::join_team(&db, &team.id, Some(&member.id)).await.unwrap();
    activities::create_activity(&db, new_activity(&owner.id, 10))
        .await
        .unwrap();
    leaderboard::refresh_entry(&db, &owner.id, Period::AllTime, Utc::now())
        .await
        .unwrap();

    let deleted = users::delete_user(&db, &owner.id).await.unwrap();
    assert_eq!(deleted.activities, 1);
    assert_eq!(deleted.teams, 1);
    assert_eq!(deleted.leaderboard_entries, 1);

    let left: Vec<Activity> = db.query_eq("user_id", &owner.id).await.unwrap();
    assert!(left.is_empty());
    let left: Vec<LeaderboardEntry> = db.query_eq("user_id", &owner.id).await.unwrap();
    assert!(left.is_empty());

    let member: User = db.fetch("User", &member.id).await.unwrap();
    assert_eq!(member.team_id, None);
}
