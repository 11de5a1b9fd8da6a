// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes: CRUD, per-user activities and stats.

use crate::db::Datastore;
use crate::error::Result;
use crate::models::{ActivityTotals, Difficulty, NewUser, Period, User, UserPatch};
use crate::routes::activities::{activity_responses, ActivityResponse};
use crate::routes::AppJson;
use crate::services::{activities, leaderboard, lookup, users};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user)
                .put(replace_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .route("/api/users/{id}/activities", get(user_activities))
        .route("/api/users/{id}/stats", get(user_stats))
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub fitness_level: Option<Difficulty>,
    pub goals: Vec<String>,
    /// Team id
    pub team: Option<String>,
    pub team_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl UserResponse {
    fn new(user: User, team_names: &HashMap<String, String>) -> Self {
        let team_name = user
            .team_id
            .as_ref()
            .and_then(|id| team_names.get(id).cloned());
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            fitness_level: user.fitness_level,
            goals: user.goals,
            team: user.team_id,
            team_name,
            created_at: format_utc_rfc3339(user.created_at),
            updated_at: format_utc_rfc3339(user.updated_at),
        }
    }
}

/// Serialize users with their team names resolved.
pub(crate) async fn user_responses(db: &Datastore, users: Vec<User>) -> Result<Vec<UserResponse>> {
    let team_names =
        lookup::team_names(db, users.iter().filter_map(|u| u.team_id.as_deref())).await?;
    Ok(users
        .into_iter()
        .map(|user| UserResponse::new(user, &team_names))
        .collect())
}

async fn user_response(db: &Datastore, user: User) -> Result<UserResponse> {
    let mut responses = user_responses(db, vec![user]).await?;
    Ok(responses.remove(0))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = users::list_users(&state.db).await?;
    Ok(Json(user_responses(&state.db, users).await?))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<NewUser>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = users::create_user(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(user_response(&state.db, user).await?)))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = users::get_user(&state.db, &id).await?;
    Ok(Json(user_response(&state.db, user).await?))
}

async fn replace_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(input): AppJson<NewUser>,
) -> Result<Json<UserResponse>> {
    let user = users::replace_user(&state.db, &id, input).await?;
    Ok(Json(user_response(&state.db, user).await?))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<UserPatch>,
) -> Result<Json<UserResponse>> {
    let user = users::update_user(&state.db, &id, patch).await?;
    Ok(Json(user_response(&state.db, user).await?))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    users::delete_user(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn user_activities(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ActivityResponse>>> {
    let activities = activities::activities_for_user(&state.db, &id).await?;
    Ok(Json(activity_responses(&state.db, activities).await?))
}

#[derive(Deserialize)]
struct StatsQuery {
    /// weekly, monthly or all-time (default)
    period: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsResponse {
    pub user: String,
    pub period: Period,
    #[serde(flatten)]
    #[cfg_attr(feature = "binding-generation", ts(flatten))]
    pub totals: ActivityTotals,
}

/// Activity totals for a user, over the whole history unless a period is given.
async fn user_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatsResponse>> {
    let period = params
        .period
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(str::parse::<Period>)
        .transpose()?
        .unwrap_or(Period::AllTime);

    let totals = leaderboard::user_stats(&state.db, &id, period, chrono::Utc::now()).await?;
    Ok(Json(StatsResponse {
        user: id,
        period,
        totals,
    }))
}
