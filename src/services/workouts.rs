// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout catalog and level-based suggestions.

use crate::db::Datastore;
use crate::error::Result;
use crate::models::{Difficulty, NewWorkout, User, Workout, WorkoutPatch};
use crate::services::by_creation;
use validator::Validate;

/// List workouts, optionally only those of one difficulty level.
pub async fn list_workouts(db: &Datastore, difficulty: Option<Difficulty>) -> Result<Vec<Workout>> {
    let mut workouts: Vec<Workout> = match difficulty {
        Some(level) => db.query_eq("difficulty_level", level.as_str()).await?,
        None => db.list().await?,
    };
    by_creation(&mut workouts, |w| (w.created_at, w.id.as_str()));
    Ok(workouts)
}

/// Workouts matching a fitness level.
///
/// An explicit level wins; otherwise the user's own fitness level is used
/// when a user id is given; otherwise beginner.
pub async fn suggestions(
    db: &Datastore,
    fitness_level: Option<Difficulty>,
    user_id: Option<&str>,
) -> Result<Vec<Workout>> {
    let level = match (fitness_level, user_id) {
        (Some(level), _) => level,
        (None, Some(user_id)) => {
            let user: User = db.fetch("User", user_id).await?;
            user.fitness_level.unwrap_or_default()
        }
        (None, None) => Difficulty::default(),
    };

    tracing::debug!(level = %level, "Suggesting workouts");
    list_workouts(db, Some(level)).await
}

pub async fn get_workout(db: &Datastore, id: &str) -> Result<Workout> {
    db.fetch("Workout", id).await
}

pub async fn create_workout(db: &Datastore, input: NewWorkout) -> Result<Workout> {
    input.validate()?;
    let workout = db.insert(Workout::from(input)).await?;
    tracing::info!(
        workout_id = %workout.id,
        difficulty = %workout.difficulty_level,
        "Workout created"
    );
    Ok(workout)
}

pub async fn replace_workout(db: &Datastore, id: &str, input: NewWorkout) -> Result<Workout> {
    input.validate()?;
    let existing = get_workout(db, id).await?;

    let mut workout = Workout::from(input);
    workout.id = existing.id;
    workout.created_at = existing.created_at;

    let workout = db.replace(workout).await?;
    tracing::info!(workout_id = %workout.id, "Workout replaced");
    Ok(workout)
}

pub async fn update_workout(db: &Datastore, id: &str, patch: WorkoutPatch) -> Result<Workout> {
    patch.validate()?;
    let mut workout = get_workout(db, id).await?;
    workout.apply(patch);

    let workout = db.replace(workout).await?;
    tracing::info!(workout_id = %workout.id, "Workout updated");
    Ok(workout)
}

pub async fn delete_workout(db: &Datastore, id: &str) -> Result<()> {
    let workout = get_workout(db, id).await?;
    db.delete::<Workout>(&workout.id).await?;
    tracing::info!(workout_id = %workout.id, "Workout deleted");
    Ok(())
}
