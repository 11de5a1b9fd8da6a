// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity routes.

use crate::db::Datastore;
use crate::error::Result;
use crate::models::{Activity, ActivityPatch, NewActivity};
use crate::routes::AppJson;
use crate::services::{activities, lookup};
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
        .route("/api/activities", get(list_activities).post(create_activity))
        .route(
            "/api/activities/{id}",
            get(get_activity)
                .put(replace_activity)
                .patch(update_activity)
                .delete(delete_activity),
        )
}

#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityResponse {
    pub id: String,
    /// Owner's user id
    pub user: String,
    pub user_username: Option<String>,
    pub activity_type: String,
    pub duration: u32,
    pub calories_burned: u32,
    pub distance: Option<f64>,
    pub notes: Option<String>,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ActivityResponse {
    fn new(activity: Activity, usernames: &HashMap<String, String>) -> Self {
        let user_username = usernames.get(&activity.user_id).cloned();
        Self {
            id: activity.id,
            user: activity.user_id,
            user_username,
            activity_type: activity.activity_type,
            duration: activity.duration,
            calories_burned: activity.calories_burned,
            distance: activity.distance,
            notes: activity.notes,
            date: format_utc_rfc3339(activity.date),
            created_at: format_utc_rfc3339(activity.created_at),
            updated_at: format_utc_rfc3339(activity.updated_at),
        }
    }
}

/// Serialize activities with owner usernames resolved.
pub(crate) async fn activity_responses(
    db: &Datastore,
    activities: Vec<Activity>,
) -> Result<Vec<ActivityResponse>> {
    let usernames = lookup::usernames(db, activities.iter().map(|a| a.user_id.as_str())).await?;
    Ok(activities
        .into_iter()
        .map(|activity| ActivityResponse::new(activity, &usernames))
        .collect())
}

async fn activity_response(db: &Datastore, activity: Activity) -> Result<ActivityResponse> {
    let mut responses = activity_responses(db, vec![activity]).await?;
    Ok(responses.remove(0))
}

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Only activities owned by this user id
    user: Option<String>,
}

/// List activities, newest first.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<Vec<ActivityResponse>>> {
    let user = params.user.as_deref().filter(|u| !u.is_empty());
    tracing::debug!(user = ?user, "Fetching activities");

    let activities = activities::list_activities(&state.db, user).await?;
    Ok(Json(activity_responses(&state.db, activities).await?))
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<NewActivity>,
) -> Result<(StatusCode, Json<ActivityResponse>)> {
    let activity = activities::create_activity(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(activity_response(&state.db, activity).await?),
    ))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActivityResponse>> {
    let activity = activities::get_activity(&state.db, &id).await?;
    Ok(Json(activity_response(&state.db, activity).await?))
}

async fn replace_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(input): AppJson<NewActivity>,
) -> Result<Json<ActivityResponse>> {
    let activity = activities::replace_activity(&state.db, &id, input).await?;
    Ok(Json(activity_response(&state.db, activity).await?))
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<ActivityPatch>,
) -> Result<Json<ActivityResponse>> {
    let activity = activities::update_activity(&state.db, &id, patch).await?;
    Ok(Json(activity_response(&state.db, activity).await?))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    activities::delete_activity(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
