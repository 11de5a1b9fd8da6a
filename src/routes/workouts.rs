// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout catalog routes.

use crate::error::Result;
use crate::models::{Difficulty, NewWorkout, Workout, WorkoutPatch};
use crate::routes::AppJson;
use crate::services::workouts;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/suggestions", get(suggestions))
        .route(
            "/api/workouts/{id}",
            get(get_workout)
                .put(replace_workout)
                .patch(update_workout)
                .delete(delete_workout),
        )
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty_level: Difficulty,
    /// Duration in minutes
    pub duration: u32,
    pub calories_estimate: u32,
    pub exercises: Vec<String>,
    pub target_muscles: Vec<String>,
    pub equipment_needed: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        Self {
            id: workout.id,
            name: workout.name,
            description: workout.description,
            difficulty_level: workout.difficulty_level,
            duration: workout.duration,
            calories_estimate: workout.calories_estimate,
            exercises: workout.exercises,
            target_muscles: workout.target_muscles,
            equipment_needed: workout.equipment_needed,
            created_at: format_utc_rfc3339(workout.created_at),
            updated_at: format_utc_rfc3339(workout.updated_at),
        }
    }
}

fn parse_level(value: Option<&str>) -> Result<Option<Difficulty>> {
    value
        .filter(|v| !v.is_empty())
        .map(str::parse::<Difficulty>)
        .transpose()
}

#[derive(Deserialize)]
struct WorkoutsQuery {
    difficulty: Option<String>,
}

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WorkoutsQuery>,
) -> Result<Json<Vec<WorkoutResponse>>> {
    let difficulty = parse_level(params.difficulty.as_deref())?;
    let workouts = workouts::list_workouts(&state.db, difficulty).await?;
    Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}

#[derive(Deserialize)]
struct SuggestionsQuery {
    fitness_level: Option<String>,
    /// Use this user's fitness level when no explicit level is given
    user: Option<String>,
}

async fn suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestionsQuery>,
) -> Result<Json<Vec<WorkoutResponse>>> {
    let level = parse_level(params.fitness_level.as_deref())?;
    let user = params.user.as_deref().filter(|u| !u.is_empty());

    let workouts = workouts::suggestions(&state.db, level, user).await?;
    Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<NewWorkout>,
) -> Result<(StatusCode, Json<WorkoutResponse>)> {
    let workout = workouts::create_workout(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(workout.into())))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutResponse>> {
    Ok(Json(workouts::get_workout(&state.db, &id).await?.into()))
}

async fn replace_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(input): AppJson<NewWorkout>,
) -> Result<Json<WorkoutResponse>> {
    let workout = workouts::replace_workout(&state.db, &id, input).await?;
    Ok(Json(workout.into()))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<WorkoutPatch>,
) -> Result<Json<WorkoutResponse>> {
    let workout = workouts::update_workout(&state.db, &id, patch).await?;
    Ok(Json(workout.into()))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    workouts::delete_workout(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
