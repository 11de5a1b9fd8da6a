// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team routes: CRUD, member listing and joining.

use crate::db::Datastore;
use crate::error::Result;
use crate::models::{NewTeam, Team, TeamPatch};
use crate::routes::users::{user_responses, UserResponse};
use crate::routes::AppJson;
use crate::services::{lookup, teams};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/teams", get(list_teams).post(create_team))
        .route(
            "/api/teams/{id}",
            get(get_team)
                .put(replace_team)
                .patch(update_team)
                .delete(delete_team),
        )
        .route("/api/teams/{id}/members", get(team_members))
        .route("/api/teams/{id}/join", post(join_team))
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Creator's user id
    pub created_by: String,
    pub created_by_username: Option<String>,
    pub member_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// Serialize teams with creator usernames and member counts resolved.
async fn team_responses(db: &Datastore, teams: Vec<Team>) -> Result<Vec<TeamResponse>> {
    let usernames = lookup::usernames(db, teams.iter().map(|t| t.created_by.as_str())).await?;
    let member_counts = lookup::member_counts(db, teams.iter().map(|t| t.id.as_str())).await?;

    Ok(teams
        .into_iter()
        .map(|team| TeamResponse {
            created_by_username: usernames.get(&team.created_by).cloned(),
            member_count: member_counts.get(&team.id).copied().unwrap_or(0),
            id: team.id,
            name: team.name,
            description: team.description,
            created_by: team.created_by,
            created_at: format_utc_rfc3339(team.created_at),
            updated_at: format_utc_rfc3339(team.updated_at),
        })
        .collect())
}

async fn team_response(db: &Datastore, team: Team) -> Result<TeamResponse> {
    let mut responses = team_responses(db, vec![team]).await?;
    Ok(responses.remove(0))
}

async fn list_teams(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TeamResponse>>> {
    let teams = teams::list_teams(&state.db).await?;
    Ok(Json(team_responses(&state.db, teams).await?))
}

async fn create_team(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<NewTeam>,
) -> Result<(StatusCode, Json<TeamResponse>)> {
    let team = teams::create_team(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(team_response(&state.db, team).await?)))
}

async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TeamResponse>> {
    let team = teams::get_team(&state.db, &id).await?;
    Ok(Json(team_response(&state.db, team).await?))
}

async fn replace_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(input): AppJson<NewTeam>,
) -> Result<Json<TeamResponse>> {
    let team = teams::replace_team(&state.db, &id, input).await?;
    Ok(Json(team_response(&state.db, team).await?))
}

async fn update_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<TeamPatch>,
) -> Result<Json<TeamResponse>> {
    let team = teams::update_team(&state.db, &id, patch).await?;
    Ok(Json(team_response(&state.db, team).await?))
}

async fn delete_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    teams::delete_team(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn team_members(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<UserResponse>>> {
    let members = teams::team_members(&state.db, &id).await?;
    Ok(Json(user_responses(&state.db, members).await?))
}

#[derive(Deserialize)]
struct JoinRequest {
    user_id: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct JoinResponse {
    pub status: String,
}

async fn join_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(request): AppJson<JoinRequest>,
) -> Result<Json<JoinResponse>> {
    teams::join_team(&state.db, &id, request.user_id.as_deref()).await?;
    Ok(Json(JoinResponse {
        status: "user joined team".to_string(),
    }))
}
