// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Team model for group competitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::{collections, Document};
use crate::models::nullable;

/// Team stored in Firestore. Members point at the team via `User::team_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    /// Unique display name
    pub name: String,
    pub description: Option<String>,
    /// User id of the creator (deleting that user deletes the team)
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Team {
    const COLLECTION: &'static str = collections::TEAMS;

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
pub struct NewTeam {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Team name must be between 1 and 200 characters"
    ))]
    pub name: String,
    pub description: Option<String>,
    /// Creator's user id
    #[validate(length(min = 1, message = "created_by is required"))]
    pub created_by: String,
}

impl From<NewTeam> for Team {
    fn from(input: NewTeam) -> Self {
        Self {
            id: String::new(),
            name: input.name,
            description: input.description,
            created_by: input.created_by,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TeamPatch {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Team name must be between 1 and 200 characters"
    ))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[validate(length(min = 1))]
    pub created_by: Option<String>,
}

impl Team {
    pub fn apply(&mut self, patch: TeamPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(created_by) = patch.created_by {
            self.created_by = created_by;
        }
    }
}
