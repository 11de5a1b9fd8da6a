//! Activity aggregates for user stats and leaderboard entries.
//!
//! Totals are a pure fold over a user's activities; callers choose which
//! activities to feed in (see [`ActivityTotals::for_period`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Activity, Period};

/// Summed activity metrics for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityTotals {
    pub total_activities: u32,
    pub total_calories: u64,
    /// Kilometers; activities without a distance contribute nothing
    pub total_distance: f64,
}

impl ActivityTotals {
    /// Add one activity to the totals.
    pub fn add(&mut self, activity: &Activity) {
        self.total_activities += 1;
        self.total_calories += u64::from(activity.calories_burned);
        self.total_distance += activity.distance.unwrap_or(0.0);
    }

    /// Totals over every activity given.
    pub fn from_activities<'a, I>(activities: I) -> Self
    where
        I: IntoIterator<Item = &'a Activity>,
    {
        activities
            .into_iter()
            .fold(Self::default(), |mut totals, activity| {
                totals.add(activity);
                totals
            })
    }

    /// Totals over the activities dated inside `period`'s window at `now`.
    pub fn for_period<'a, I>(activities: I, period: Period, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Activity>,
    {
        Self::from_activities(
            activities
                .into_iter()
                .filter(|activity| period.includes(activity.date, now)),
        )
    }
}
