// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard aggregation and per-period listings.
//!
//! Handles:
//! 1. Per-user activity totals, optionally scoped to a period window
//! 2. Refreshing a user's entry for a period from those totals
//! 3. Rank-ordered listings (rank is stored, never derived from totals)
//! 4. Entry CRUD with the one-entry-per-(user, period) constraint

use chrono::{DateTime, Utc};

use crate::db::Datastore;
use crate::error::{AppError, Result};
use crate::models::leaderboard::sort_by_rank;
use crate::models::{
    Activity, ActivityTotals, LeaderboardEntry, LeaderboardPatch, NewLeaderboardEntry, Period,
    Team, User,
};
use validator::Validate;

/// Totals over a user's activities inside `period`'s window at `now`.
pub async fn user_stats(
    db: &Datastore,
    user_id: &str,
    period: Period,
    now: DateTime<Utc>,
) -> Result<ActivityTotals> {
    let user: User = db.fetch("User", user_id).await?;
    let activities: Vec<Activity> = db.query_eq("user_id", &user.id).await?;
    Ok(ActivityTotals::for_period(&activities, period, now))
}

/// Recompute the (user, period) entry from the user's activities.
///
/// Creates the entry with rank 0 if missing; an existing entry keeps its
/// stored rank. The team reference follows the user's current team.
pub async fn refresh_entry(
    db: &Datastore,
    user_id: &str,
    period: Period,
    now: DateTime<Utc>,
) -> Result<LeaderboardEntry> {
    let user: User = db.fetch("User", user_id).await?;
    let activities: Vec<Activity> = db.query_eq("user_id", &user.id).await?;
    let totals = ActivityTotals::for_period(&activities, period, now);

    let existing = entries_for_user(db, &user.id)
        .await?
        .into_iter()
        .find(|entry| entry.period == period);

    let entry = match existing {
        Some(mut entry) => {
            entry.team_id = user.team_id.clone();
            apply_totals(&mut entry, &totals);
            db.replace(entry).await?
        }
        None => {
            let mut entry = LeaderboardEntry::from(NewLeaderboardEntry {
                user: user.id.clone(),
                team: user.team_id.clone(),
                total_calories: 0,
                total_activities: 0,
                total_distance: 0.0,
                rank: 0,
                period,
            });
            apply_totals(&mut entry, &totals);
            db.insert(entry).await?
        }
    };

    tracing::info!(
        user_id = %user.id,
        period = %period,
        total_calories = entry.total_calories,
        total_activities = entry.total_activities,
        "Leaderboard entry refreshed"
    );
    Ok(entry)
}

fn apply_totals(entry: &mut LeaderboardEntry, totals: &ActivityTotals) {
    entry.total_calories = totals.total_calories;
    entry.total_activities = totals.total_activities;
    entry.total_distance = totals.total_distance;
}

async fn entries_for_user(db: &Datastore, user_id: &str) -> Result<Vec<LeaderboardEntry>> {
    db.query_eq("user_id", user_id).await
}

/// All entries (or one period's), ordered by stored rank.
pub async fn list_entries(db: &Datastore, period: Option<Period>) -> Result<Vec<LeaderboardEntry>> {
    let mut entries: Vec<LeaderboardEntry> = match period {
        Some(period) => db.query_eq("period", period.as_str()).await?,
        None => db.list().await?,
    };
    sort_by_rank(&mut entries);
    Ok(entries)
}

/// One period's leaderboard, rank ascending.
pub async fn ranked(db: &Datastore, period: Period) -> Result<Vec<LeaderboardEntry>> {
    list_entries(db, Some(period)).await
}

pub async fn get_entry(db: &Datastore, id: &str) -> Result<LeaderboardEntry> {
    db.fetch("Leaderboard entry", id).await
}

pub async fn create_entry(db: &Datastore, input: NewLeaderboardEntry) -> Result<LeaderboardEntry> {
    input.validate()?;
    let entry = LeaderboardEntry::from(input);
    check_constraints(db, &entry).await?;

    let entry = db.insert(entry).await?;
    tracing::info!(
        entry_id = %entry.id,
        user_id = %entry.user_id,
        period = %entry.period,
        rank = entry.rank,
        "Leaderboard entry created"
    );
    Ok(entry)
}

pub async fn replace_entry(
    db: &Datastore,
    id: &str,
    input: NewLeaderboardEntry,
) -> Result<LeaderboardEntry> {
    input.validate()?;
    let existing = get_entry(db, id).await?;

    let mut entry = LeaderboardEntry::from(input);
    entry.id = existing.id;
    entry.created_at = existing.created_at;
    check_constraints(db, &entry).await?;

    let entry = db.replace(entry).await?;
    tracing::info!(entry_id = %entry.id, "Leaderboard entry replaced");
    Ok(entry)
}

pub async fn update_entry(
    db: &Datastore,
    id: &str,
    patch: LeaderboardPatch,
) -> Result<LeaderboardEntry> {
    patch.validate()?;
    let mut entry = get_entry(db, id).await?;
    entry.apply(patch);
    check_constraints(db, &entry).await?;

    let entry = db.replace(entry).await?;
    tracing::info!(entry_id = %entry.id, "Leaderboard entry updated");
    Ok(entry)
}

pub async fn delete_entry(db: &Datastore, id: &str) -> Result<()> {
    let entry = get_entry(db, id).await?;
    db.delete::<LeaderboardEntry>(&entry.id).await?;
    tracing::info!(entry_id = %entry.id, "Leaderboard entry deleted");
    Ok(())
}

/// References must resolve and (user, period) must be unique.
async fn check_constraints(db: &Datastore, entry: &LeaderboardEntry) -> Result<()> {
    db.fetch::<User>("User", &entry.user_id).await?;
    if let Some(team_id) = &entry.team_id {
        db.fetch::<Team>("Team", team_id).await?;
    }

    let duplicate = entries_for_user(db, &entry.user_id)
        .await?
        .iter()
        .any(|other| other.period == entry.period && other.id != entry.id);
    if duplicate {
        return Err(AppError::Validation(format!(
            "User {} already has a {} leaderboard entry",
            entry.user_id, entry.period
        )));
    }
    Ok(())
}
