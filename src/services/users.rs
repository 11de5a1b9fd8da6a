// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration, profile edits and cascading deletion.

use crate::db::Datastore;
use crate::error::{AppError, Result};
use crate::models::{Activity, LeaderboardEntry, NewUser, Team, User, UserPatch};
use crate::services::{by_creation, teams};
use validator::{Validate, ValidateEmail};

/// Documents removed by a user deletion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserDeletion {
    pub activities: usize,
    pub leaderboard_entries: usize,
    pub teams: usize,
}

pub async fn list_users(db: &Datastore) -> Result<Vec<User>> {
    let mut users: Vec<User> = db.list().await?;
    by_creation(&mut users, |u| (u.created_at, u.id.as_str()));
    Ok(users)
}

pub async fn get_user(db: &Datastore, id: &str) -> Result<User> {
    db.fetch("User", id).await
}

pub async fn create_user(db: &Datastore, input: NewUser) -> Result<User> {
    input.validate()?;
    let user = User::from(input);
    check_constraints(db, &user).await?;

    let user = db.insert(user).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User created");
    Ok(user)
}

/// Full replace (PUT). Keeps id and creation time.
pub async fn replace_user(db: &Datastore, id: &str, input: NewUser) -> Result<User> {
    input.validate()?;
    let existing = get_user(db, id).await?;

    let mut user = User::from(input);
    user.id = existing.id;
    user.created_at = existing.created_at;
    check_constraints(db, &user).await?;

    let user = db.replace(user).await?;
    tracing::info!(user_id = %user.id, "User replaced");
    Ok(user)
}

/// Partial update (PATCH).
pub async fn update_user(db: &Datastore, id: &str, patch: UserPatch) -> Result<User> {
    patch.validate()?;
    if let Some(Some(email)) = &patch.email {
        if !email.validate_email() {
            return Err(AppError::Validation("Invalid email format".to_string()));
        }
    }

    let mut user = get_user(db, id).await?;
    user.apply(patch);
    check_constraints(db, &user).await?;

    let user = db.replace(user).await?;
    tracing::info!(user_id = %user.id, "User updated");
    Ok(user)
}

/// Delete a user with everything they own: activities, leaderboard entries
/// and the teams they created.
pub async fn delete_user(db: &Datastore, id: &str) -> Result<UserDeletion> {
    let user = get_user(db, id).await?;
    let mut deleted = UserDeletion::default();

    let created_teams: Vec<Team> = db.query_eq("created_by", &user.id).await?;
    for team in &created_teams {
        let cascade = teams::delete_team(db, &team.id).await?;
        deleted.leaderboard_entries += cascade.leaderboard_entries;
        deleted.teams += 1;
    }

    let activities: Vec<Activity> = db.query_eq("user_id", &user.id).await?;
    deleted.activities = db.delete_all(&activities).await?;
    tracing::debug!(user_id = %user.id, count = deleted.activities, "Deleted activities");

    let entries: Vec<LeaderboardEntry> = db.query_eq("user_id", &user.id).await?;
    deleted.leaderboard_entries += db.delete_all(&entries).await?;
    tracing::debug!(user_id = %user.id, count = entries.len(), "Deleted leaderboard entries");

    db.delete::<User>(&user.id).await?;

    tracing::info!(
        user_id = %user.id,
        activities = deleted.activities,
        leaderboard_entries = deleted.leaderboard_entries,
        teams = deleted.teams,
        "User deletion complete"
    );
    Ok(deleted)
}

/// Username must be unique and the team reference must resolve.
async fn check_constraints(db: &Datastore, user: &User) -> Result<()> {
    let same_name: Vec<User> = db.query_eq("username", &user.username).await?;
    if same_name.iter().any(|other| other.id != user.id) {
        return Err(AppError::Validation(format!(
            "A user with username '{}' already exists",
            user.username
        )));
    }

    if let Some(team_id) = &user.team_id {
        db.fetch::<Team>("Team", team_id).await?;
    }
    Ok(())
}
