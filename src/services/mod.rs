// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.
//!
//! Every operation takes the [`Datastore`](crate::db::Datastore) handle
//! explicitly and returns the stored documents or an [`AppError`](crate::error::AppError).

pub mod activities;
pub mod leaderboard;
pub mod lookup;
pub mod teams;
pub mod users;
pub mod workouts;

/// Upper bound on in-flight datastore calls for one fan-out.
pub(crate) const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Stable listing order for documents without a natural sort key.
pub(crate) fn by_creation<T, F>(docs: &mut [T], key: F)
where
    F: Fn(&T) -> (chrono::DateTime<chrono::Utc>, &str),
{
    docs.sort_by(|a, b| key(a).cmp(&key(b)));
}
