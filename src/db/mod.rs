//! Database layer (Firestore, with an in-process fallback).

pub mod firestore;
pub mod memory;
pub mod store;

pub use store::Datastore;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TEAMS: &str = "teams";
    pub const ACTIVITIES: &str = "activities";
    pub const LEADERBOARD: &str = "leaderboard";
    pub const WORKOUTS: &str = "workouts";
}

/// A record stored as one document in a named collection.
///
/// The store owns the document id and both timestamps: ids are assigned on
/// first insert, `updated_at` is refreshed on every write.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Give a new document its id and creation time.
    fn assign_id(&mut self, id: String, now: DateTime<Utc>);

    /// Mark the document as written at `now`.
    fn touch(&mut self, now: DateTime<Utc>);
}
