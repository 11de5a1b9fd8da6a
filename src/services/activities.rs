// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity logging.

use crate::db::Datastore;
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityPatch, NewActivity, User};
use validator::Validate;

/// Newest first; ties by id for a stable order.
fn sort_by_date_desc(activities: &mut [Activity]) {
    activities.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}

/// List activities, optionally only those owned by `user_id`.
pub async fn list_activities(db: &Datastore, user_id: Option<&str>) -> Result<Vec<Activity>> {
    let mut activities: Vec<Activity> = match user_id {
        Some(user_id) => db.query_eq("user_id", user_id).await?,
        None => db.list().await?,
    };
    sort_by_date_desc(&mut activities);
    Ok(activities)
}

/// All activities of an existing user.
pub async fn activities_for_user(db: &Datastore, user_id: &str) -> Result<Vec<Activity>> {
    db.fetch::<User>("User", user_id).await?;
    list_activities(db, Some(user_id)).await
}

pub async fn get_activity(db: &Datastore, id: &str) -> Result<Activity> {
    db.fetch("Activity", id).await
}

pub async fn create_activity(db: &Datastore, input: NewActivity) -> Result<Activity> {
    input.validate()?;
    db.fetch::<User>("User", &input.user).await?;

    let activity = db.insert(Activity::from(input)).await?;
    tracing::info!(
        activity_id = %activity.id,
        user_id = %activity.user_id,
        activity_type = %activity.activity_type,
        calories = activity.calories_burned,
        "Activity logged"
    );
    Ok(activity)
}

pub async fn replace_activity(db: &Datastore, id: &str, input: NewActivity) -> Result<Activity> {
    input.validate()?;
    let existing = get_activity(db, id).await?;
    db.fetch::<User>("User", &input.user).await?;

    let mut activity = Activity::from(input);
    activity.id = existing.id;
    activity.created_at = existing.created_at;

    let activity = db.replace(activity).await?;
    tracing::info!(activity_id = %activity.id, "Activity replaced");
    Ok(activity)
}

pub async fn update_activity(db: &Datastore, id: &str, patch: ActivityPatch) -> Result<Activity> {
    patch.validate()?;
    if let Some(Some(distance)) = patch.distance {
        if distance < 0.0 {
            return Err(AppError::Validation("Distance cannot be negative".to_string()));
        }
    }

    let mut activity = get_activity(db, id).await?;
    if let Some(user_id) = &patch.user {
        db.fetch::<User>("User", user_id).await?;
    }
    activity.apply(patch);

    let activity = db.replace(activity).await?;
    tracing::info!(activity_id = %activity.id, "Activity updated");
    Ok(activity)
}

pub async fn delete_activity(db: &Datastore, id: &str) -> Result<()> {
    let activity = get_activity(db, id).await?;
    db.delete::<Activity>(&activity.id).await?;
    tracing::info!(activity_id = %activity.id, user_id = %activity.user_id, "Activity deleted");
    Ok(())
}
