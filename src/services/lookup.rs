// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Batched reference resolution for denormalized response fields
//! (`user_username`, `team_name`, `member_count`).

use crate::db::{Datastore, Document};
use crate::error::{AppError, Result};
use crate::models::{Team, User};
use crate::services::MAX_CONCURRENT_DB_OPS;
use futures_util::{stream, StreamExt};
use std::collections::{BTreeSet, HashMap};

/// Fetch each distinct document id once, concurrently, and map id -> `field`.
///
/// Ids that no longer resolve are left out of the map.
async fn resolve<'a, T, I, F>(db: &Datastore, ids: I, field: F) -> Result<HashMap<String, String>>
where
    T: Document,
    I: IntoIterator<Item = &'a str>,
    F: Fn(T) -> String + Copy,
{
    let unique: BTreeSet<String> = ids.into_iter().map(str::to_string).collect();

    let resolved = stream::iter(unique)
        .map(|id| async move {
            let doc: Option<T> = db.get(&id).await?;
            Ok::<_, AppError>(doc.map(|d| (id, field(d))))
        })
        .buffer_unordered(MAX_CONCURRENT_DB_OPS)
        .collect::<Vec<Result<Option<(String, String)>>>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    Ok(resolved.into_iter().flatten().collect())
}

/// Map user ids to usernames.
pub async fn usernames<'a, I>(db: &Datastore, ids: I) -> Result<HashMap<String, String>>
where
    I: IntoIterator<Item = &'a str>,
{
    resolve(db, ids, |user: User| user.username).await
}

/// Map team ids to team names.
pub async fn team_names<'a, I>(db: &Datastore, ids: I) -> Result<HashMap<String, String>>
where
    I: IntoIterator<Item = &'a str>,
{
    resolve(db, ids, |team: Team| team.name).await
}

/// Count members of each team.
pub async fn member_counts<'a, I>(db: &Datastore, team_ids: I) -> Result<HashMap<String, u32>>
where
    I: IntoIterator<Item = &'a str>,
{
    let unique: BTreeSet<String> = team_ids.into_iter().map(str::to_string).collect();

    stream::iter(unique)
        .map(|id| async move {
            let members: Vec<User> = db.query_eq("team_id", &id).await?;
            Ok::<_, AppError>((id, members.len() as u32))
        })
        .buffer_unordered(MAX_CONCURRENT_DB_OPS)
        .collect::<Vec<Result<(String, u32)>>>()
        .await
        .into_iter()
        .collect()
}
