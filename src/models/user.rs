//! User model for storage and API input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::db::{collections, Document};
use crate::models::{nullable, Difficulty};

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document ID
    pub id: String,
    /// Unique login name
    pub username: String,
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub bio: Option<String>,
    /// Self-reported level, used for workout suggestions
    pub fitness_level: Option<Difficulty>,
    /// Personal goals, in the order the user listed them
    #[serde(default)]
    pub goals: Vec<String>,
    /// Team membership (null when not on a team)
    pub team_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for User {
    const COLLECTION: &'static str = collections::USERS;

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

/// Registration / full-replace body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(
        length(min = 1, max = 150, message = "Username must be between 1 and 150 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    pub bio: Option<String>,
    pub fitness_level: Option<Difficulty>,
    #[serde(default)]
    pub goals: Vec<String>,
    /// Team id
    pub team: Option<String>,
}

impl From<NewUser> for User {
    fn from(input: NewUser) -> Self {
        Self {
            id: String::new(),
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            bio: input.bio,
            fitness_level: input.fitness_level,
            goals: input.goals,
            team_id: input.team,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}

/// Partial profile update. `null` clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserPatch {
    #[validate(
        length(min = 1, max = 150, message = "Username must be between 1 and 150 characters"),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub fitness_level: Option<Option<Difficulty>>,
    pub goals: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub team: Option<Option<String>>,
}

impl User {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(level) = patch.fitness_level {
            self.fitness_level = level;
        }
        if let Some(goals) = patch.goals {
            self.goals = goals;
        }
        if let Some(team) = patch.team {
            self.team_id = team;
        }
    }
}

/// Letters, digits and `@.+-_` only.
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        Ok(())
    } else {
        Err(ValidationError::new("username")
            .with_message("Username may only contain letters, digits and @/./+/-/_".into()))
    }
}
