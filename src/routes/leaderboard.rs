// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard routes: entry CRUD, per-period rankings and refresh.

use crate::db::Datastore;
use crate::error::Result;
use crate::models::{LeaderboardEntry, LeaderboardPatch, NewLeaderboardEntry, Period};
use crate::routes::AppJson;
use crate::services::{leaderboard, lookup};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    // Static segments take priority over `{id}` in axum's matcher
    Router::new()
        .route("/api/leaderboard", get(list_entries).post(create_entry))
        .route("/api/leaderboard/weekly", get(weekly))
        .route("/api/leaderboard/monthly", get(monthly))
        .route("/api/leaderboard/all_time", get(all_time))
        .route("/api/leaderboard/refresh", post(refresh))
        .route(
            "/api/leaderboard/{id}",
            get(get_entry)
                .put(replace_entry)
                .patch(update_entry)
                .delete(delete_entry),
        )
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardResponse {
    pub id: String,
    /// User id
    pub user: String,
    pub user_username: Option<String>,
    /// Team id
    pub team: Option<String>,
    pub team_name: Option<String>,
    pub total_calories: u64,
    pub total_activities: u32,
    pub total_distance: f64,
    pub rank: u32,
    pub period: Period,
    pub created_at: String,
    pub updated_at: String,
}

/// Serialize entries with usernames and team names resolved, keeping order.
async fn entry_responses(
    db: &Datastore,
    entries: Vec<LeaderboardEntry>,
) -> Result<Vec<LeaderboardResponse>> {
    let usernames = lookup::usernames(db, entries.iter().map(|e| e.user_id.as_str())).await?;
    let team_names =
        lookup::team_names(db, entries.iter().filter_map(|e| e.team_id.as_deref())).await?;

    Ok(entries
        .into_iter()
        .map(|entry| LeaderboardResponse {
            user_username: usernames.get(&entry.user_id).cloned(),
            team_name: entry
                .team_id
                .as_ref()
                .and_then(|id| team_names.get(id).cloned()),
            id: entry.id,
            user: entry.user_id,
            team: entry.team_id,
            total_calories: entry.total_calories,
            total_activities: entry.total_activities,
            total_distance: entry.total_distance,
            rank: entry.rank,
            period: entry.period,
            created_at: format_utc_rfc3339(entry.created_at),
            updated_at: format_utc_rfc3339(entry.updated_at),
        })
        .collect())
}

async fn entry_response(db: &Datastore, entry: LeaderboardEntry) -> Result<LeaderboardResponse> {
    let mut responses = entry_responses(db, vec![entry]).await?;
    Ok(responses.remove(0))
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    period: Option<String>,
}

/// List entries ordered by rank, optionally restricted to one period.
async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardResponse>>> {
    let period = params
        .period
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(str::parse::<Period>)
        .transpose()?;

    let entries = leaderboard::list_entries(&state.db, period).await?;
    Ok(Json(entry_responses(&state.db, entries).await?))
}

async fn ranked(state: &AppState, period: Period) -> Result<Json<Vec<LeaderboardResponse>>> {
    let entries = leaderboard::ranked(&state.db, period).await?;
    Ok(Json(entry_responses(&state.db, entries).await?))
}

async fn weekly(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LeaderboardResponse>>> {
    ranked(&state, Period::Weekly).await
}

async fn monthly(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LeaderboardResponse>>> {
    ranked(&state, Period::Monthly).await
}

async fn all_time(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LeaderboardResponse>>> {
    ranked(&state, Period::AllTime).await
}

#[derive(Deserialize)]
struct RefreshRequest {
    user_id: String,
    #[serde(default)]
    period: Period,
}

/// Recompute one user's totals for a period and upsert the entry.
async fn refresh(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<RefreshRequest>,
) -> Result<Json<LeaderboardResponse>> {
    let entry = leaderboard::refresh_entry(
        &state.db,
        &request.user_id,
        request.period,
        chrono::Utc::now(),
    )
    .await?;
    Ok(Json(entry_response(&state.db, entry).await?))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<NewLeaderboardEntry>,
) -> Result<(StatusCode, Json<LeaderboardResponse>)> {
    let entry = leaderboard::create_entry(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(entry_response(&state.db, entry).await?),
    ))
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LeaderboardResponse>> {
    let entry = leaderboard::get_entry(&state.db, &id).await?;
    Ok(Json(entry_response(&state.db, entry).await?))
}

async fn replace_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(input): AppJson<NewLeaderboardEntry>,
) -> Result<Json<LeaderboardResponse>> {
    let entry = leaderboard::replace_entry(&state.db, &id, input).await?;
    Ok(Json(entry_response(&state.db, entry).await?))
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<LeaderboardPatch>,
) -> Result<Json<LeaderboardResponse>> {
    let entry = leaderboard::update_entry(&state.db, &id, patch).await?;
    Ok(Json(entry_response(&state.db, entry).await?))
}

async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    leaderboard::delete_entry(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
