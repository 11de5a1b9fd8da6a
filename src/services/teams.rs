// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team management, membership and cascading deletion.

use crate::db::Datastore;
use crate::error::{AppError, Result};
use crate::models::{LeaderboardEntry, NewTeam, Team, TeamPatch, User};
use crate::services::{by_creation, MAX_CONCURRENT_DB_OPS};
use futures_util::{stream, StreamExt};
use validator::Validate;

/// Documents affected by a team deletion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TeamDeletion {
    pub leaderboard_entries: usize,
    /// Members whose team reference was cleared
    pub members_released: usize,
}

pub async fn list_teams(db: &Datastore) -> Result<Vec<Team>> {
    let mut teams: Vec<Team> = db.list().await?;
    by_creation(&mut teams, |t| (t.created_at, t.id.as_str()));
    Ok(teams)
}

pub async fn get_team(db: &Datastore, id: &str) -> Result<Team> {
    db.fetch("Team", id).await
}

pub async fn create_team(db: &Datastore, input: NewTeam) -> Result<Team> {
    input.validate()?;
    let team = Team::from(input);
    check_constraints(db, &team).await?;

    let team = db.insert(team).await?;
    tracing::info!(team_id = %team.id, name = %team.name, "Team created");
    Ok(team)
}

pub async fn replace_team(db: &Datastore, id: &str, input: NewTeam) -> Result<Team> {
    input.validate()?;
    let existing = get_team(db, id).await?;

    let mut team = Team::from(input);
    team.id = existing.id;
    team.created_at = existing.created_at;
    check_constraints(db, &team).await?;

    let team = db.replace(team).await?;
    tracing::info!(team_id = %team.id, "Team replaced");
    Ok(team)
}

pub async fn update_team(db: &Datastore, id: &str, patch: TeamPatch) -> Result<Team> {
    patch.validate()?;
    let mut team = get_team(db, id).await?;
    team.apply(patch);
    check_constraints(db, &team).await?;

    let team = db.replace(team).await?;
    tracing::info!(team_id = %team.id, "Team updated");
    Ok(team)
}

/// Delete a team: its leaderboard entries go with it, its members stay but
/// lose their team reference.
pub async fn delete_team(db: &Datastore, id: &str) -> Result<TeamDeletion> {
    let team = get_team(db, id).await?;

    let entries: Vec<LeaderboardEntry> = db.query_eq("team_id", &team.id).await?;
    let leaderboard_entries = db.delete_all(&entries).await?;

    let members: Vec<User> = db.query_eq("team_id", &team.id).await?;
    let members_released = members.len();
    stream::iter(members)
        .map(|mut member| async move {
            member.team_id = None;
            db.replace(member).await.map(|_| ())
        })
        .buffer_unordered(MAX_CONCURRENT_DB_OPS)
        .collect::<Vec<Result<()>>>()
        .await
        .into_iter()
        .collect::<Result<Vec<()>>>()?;

    db.delete::<Team>(&team.id).await?;

    tracing::info!(
        team_id = %team.id,
        leaderboard_entries,
        members_released,
        "Team deleted"
    );
    Ok(TeamDeletion {
        leaderboard_entries,
        members_released,
    })
}

/// Users whose team reference points at this team.
pub async fn team_members(db: &Datastore, id: &str) -> Result<Vec<User>> {
    let team = get_team(db, id).await?;
    let mut members: Vec<User> = db.query_eq("team_id", &team.id).await?;
    by_creation(&mut members, |u| (u.created_at, u.id.as_str()));
    Ok(members)
}

/// Move a user onto a team. Last write wins if two joins race.
///
/// A missing or unknown user id is `NotFound` and leaves the team untouched.
pub async fn join_team(db: &Datastore, team_id: &str, user_id: Option<&str>) -> Result<User> {
    let team = get_team(db, team_id).await?;
    let user: Option<User> = match user_id {
        Some(id) => db.get(id).await?,
        None => None,
    };
    let mut user = user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    user.team_id = Some(team.id.clone());
    let user = db.replace(user).await?;

    tracing::info!(team_id = %team.id, user_id = %user.id, "User joined team");
    Ok(user)
}

/// Team name must be unique and the creator must exist.
async fn check_constraints(db: &Datastore, team: &Team) -> Result<()> {
    let same_name: Vec<Team> = db.query_eq("name", &team.name).await?;
    if same_name.iter().any(|other| other.id != team.id) {
        return Err(AppError::Validation(format!(
            "A team named '{}' already exists",
            team.name
        )));
    }

    db.fetch::<User>("User", &team.created_by).await?;
    Ok(())
}
