// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Leaderboard entries and ranking periods.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::{collections, Document};
use crate::error::AppError;
use crate::models::nullable;
use crate::time_utils::{start_of_iso_week, start_of_month};

/// Ranking window a leaderboard entry belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Period {
    #[default]
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "all-time")]
    AllTime,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::AllTime => "all-time",
        }
    }

    /// Earliest activity date counted for this period, `None` for all-time.
    pub fn window_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Period::Weekly => Some(start_of_iso_week(now)),
            Period::Monthly => Some(start_of_month(now)),
            Period::AllTime => None,
        }
    }

    /// Whether an activity dated `date` counts towards this period at `now`.
    pub fn includes(&self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.window_start(now).is_none_or(|start| date >= start)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "all-time" => Ok(Period::AllTime),
            other => Err(AppError::Validation(format!(
                "Unknown period '{}': expected weekly, monthly or all-time",
                other
            ))),
        }
    }
}

/// Leaderboard entry stored in Firestore.
///
/// At most one entry exists per (user, period). Totals are derived from the
/// user's activities; `rank` is stored as given and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub user_id: String,
    pub team_id: Option<String>,
    #[serde(default)]
    pub total_calories: u64,
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub period: Period,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for LeaderboardEntry {
    const COLLECTION: &'static str = collections::LEADERBOARD;

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
pub struct NewLeaderboardEntry {
    #[validate(length(min = 1, message = "user is required"))]
    pub user: String,
    pub team: Option<String>,
    #[serde(default)]
    pub total_calories: u64,
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Distance cannot be negative"))]
    pub total_distance: f64,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub period: Period,
}

impl From<NewLeaderboardEntry> for LeaderboardEntry {
    fn from(input: NewLeaderboardEntry) -> Self {
        Self {
            id: String::new(),
            user_id: input.user,
            team_id: input.team,
            total_calories: input.total_calories,
            total_activities: input.total_activities,
            total_distance: input.total_distance,
            rank: input.rank,
            period: input.period,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LeaderboardPatch {
    #[validate(length(min = 1))]
    pub user: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub team: Option<Option<String>>,
    pub total_calories: Option<u64>,
    pub total_activities: Option<u32>,
    #[validate(range(min = 0.0))]
    pub total_distance: Option<f64>,
    pub rank: Option<u32>,
    pub period: Option<Period>,
}

impl LeaderboardEntry {
    pub fn apply(&mut self, patch: LeaderboardPatch) {
        if let Some(user) = patch.user {
            self.user_id = user;
        }
        if let Some(team) = patch.team {
            self.team_id = team;
        }
        if let Some(calories) = patch.total_calories {
            self.total_calories = calories;
        }
        if let Some(count) = patch.total_activities {
            self.total_activities = count;
        }
        if let Some(distance) = patch.total_distance {
            self.total_distance = distance;
        }
        if let Some(rank) = patch.rank {
            self.rank = rank;
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
    }
}

/// Order entries by stored rank, then creation time, then id.
pub fn sort_by_rank(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        a.rank
            .cmp(&b.rank)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}
