// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod leaderboard;
pub mod stats;
pub mod team;
pub mod user;
pub mod workout;

pub use activity::{Activity, ActivityPatch, NewActivity};
pub use leaderboard::{LeaderboardEntry, LeaderboardPatch, NewLeaderboardEntry, Period};
pub use stats::ActivityTotals;
pub use team::{NewTeam, Team, TeamPatch};
pub use user::{NewUser, User, UserPatch};
pub use workout::{Difficulty, NewWorkout, Workout, WorkoutPatch};

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`)
/// in PATCH bodies.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
