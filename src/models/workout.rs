// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout catalog model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::{collections, Document};
use crate::error::AppError;

/// Workout difficulty, also used as a user's fitness level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(AppError::Validation(format!(
                "Unknown difficulty level '{}': expected beginner, intermediate or advanced",
                other
            ))),
        }
    }
}

/// Catalog workout stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty_level: Difficulty,
    /// Duration in minutes
    pub duration: u32,
    pub calories_estimate: u32,
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    #[serde(default)]
    pub equipment_needed: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Workout {
    const COLLECTION: &'static str = collections::WORKOUTS;

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
pub struct NewWorkout {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Workout name must be between 1 and 200 characters"
    ))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty_level: Difficulty,
    pub duration: u32,
    pub calories_estimate: u32,
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    #[serde(default)]
    pub equipment_needed: Vec<String>,
}

impl From<NewWorkout> for Workout {
    fn from(input: NewWorkout) -> Self {
        Self {
            id: String::new(),
            name: input.name,
            description: input.description,
            difficulty_level: input.difficulty_level,
            duration: input.duration,
            calories_estimate: input.calories_estimate,
            exercises: input.exercises,
            target_muscles: input.target_muscles,
            equipment_needed: input.equipment_needed,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct WorkoutPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub difficulty_level: Option<Difficulty>,
    pub duration: Option<u32>,
    pub calories_estimate: Option<u32>,
    pub exercises: Option<Vec<String>>,
    pub target_muscles: Option<Vec<String>>,
    pub equipment_needed: Option<Vec<String>>,
}

impl Workout {
    pub fn apply(&mut self, patch: WorkoutPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(level) = patch.difficulty_level {
            self.difficulty_level = level;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(calories) = patch.calories_estimate {
            self.calories_estimate = calories;
        }
        if let Some(exercises) = patch.exercises {
            self.exercises = exercises;
        }
        if let Some(muscles) = patch.target_muscles {
            self.target_muscles = muscles;
        }
        if let Some(equipment) = patch.equipment_needed {
            self.equipment_needed = equipment;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_wire_format() {
        assert_eq!(
            serde_json::to_value(Difficulty::Intermediate).unwrap(),
            "intermediate"
        );
        assert_eq!(
            "advanced".parse::<Difficulty>().unwrap(),
            Difficulty::Advanced
        );
        assert!(matches!(
            "Expert".parse::<Difficulty>(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_list_fields_default_to_empty() {
        let input: NewWorkout = serde_json::from_str(
            r#"{"name": "Morning Cardio", "difficulty_level": "beginner",
                "duration": 30, "calories_estimate": 250}"#,
        )
        .unwrap();
        let workout = Workout::from(input);
        assert!(workout.exercises.is_empty());
        assert!(workout.equipment_needed.is_empty());
        assert_eq!(workout.description, "");
    }
}
