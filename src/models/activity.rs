// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for tracked exercise sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::{collections, Document};
use crate::models::nullable;

/// Stored activity record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    /// Owner (deleting the user deletes the activity)
    pub user_id: String,
    /// Free-text category (Running, Cycling, ...)
    pub activity_type: String,
    /// Duration in minutes
    pub duration: u32,
    pub calories_burned: u32,
    /// Distance in kilometers
    pub distance: Option<f64>,
    pub notes: Option<String>,
    /// When the activity took place
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Activity {
    const COLLECTION: &'static str = collections::ACTIVITIES;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String, now: DateTime<Utc>) {
        self.id = id;
        self.created_at = now;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewActivity {
    /// Owner's user id
    #[validate(length(min = 1, message = "user is required"))]
    pub user: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Activity type must be between 1 and 100 characters"
    ))]
    pub activity_type: String,
    pub duration: u32,
    pub calories_burned: u32,
    #[validate(range(min = 0.0, message = "Distance cannot be negative"))]
    pub distance: Option<f64>,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
}

impl From<NewActivity> for Activity {
    fn from(input: NewActivity) -> Self {
        Self {
            id: String::new(),
            user_id: input.user,
            activity_type: input.activity_type,
            duration: input.duration,
            calories_burned: input.calories_burned,
            distance: input.distance,
            notes: input.notes,
            date: input.date,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ActivityPatch {
    #[validate(length(min = 1))]
    pub user: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub activity_type: Option<String>,
    pub duration: Option<u32>,
    pub calories_burned: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub distance: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    pub date: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn apply(&mut self, patch: ActivityPatch) {
        if let Some(user) = patch.user {
            self.user_id = user;
        }
        if let Some(activity_type) = patch.activity_type {
            self.activity_type = activity_type;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(calories) = patch.calories_burned {
            self.calories_burned = calories;
        }
        if let Some(distance) = patch.distance {
            self.distance = distance;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}
