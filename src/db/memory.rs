// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document storage.
//!
//! Documents are kept as JSON values so that field filters see exactly what
//! Firestore would: enum tags, optional ids and so on.

use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Collections of JSON documents keyed by document id.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    collections: Arc<DashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryBackend {
    pub fn get(&self, collection: &str, id: &str) -> Option<Value> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned())
    }

    pub fn list(&self, collection: &str) -> Vec<Value> {
        self.collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Documents whose top-level string `field` equals `value`.
    pub fn query_eq(&self, collection: &str, field: &str, value: &str) -> Vec<Value> {
        self.collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| doc.get(field).and_then(Value::as_str) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set(&self, collection: &str, id: &str, doc: Value) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc);
    }

    /// Returns whether a document was removed.
    pub fn delete(&self, collection: &str, id: &str) -> bool {
        self.collections
            .get_mut(collection)
            .is_some_and(|mut docs| docs.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_eq_matches_string_fields_only() {
        let store = MemoryBackend::default();
        store.set("leaderboard", "a", json!({"id": "a", "period": "weekly"}));
        store.set("leaderboard", "b", json!({"id": "b", "period": "monthly"}));
        store.set("leaderboard", "c", json!({"id": "c", "period": null}));

        let weekly = store.query_eq("leaderboard", "period", "weekly");
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0]["id"], "a");

        assert!(store.query_eq("leaderboard", "rank", "1").is_empty());
        assert!(store.query_eq("missing", "period", "weekly").is_empty());
    }

    #[test]
    fn test_set_overwrites_and_delete_reports_presence() {
        let store = MemoryBackend::default();
        store.set("teams", "t1", json!({"name": "Red"}));
        store.set("teams", "t1", json!({"name": "Blue"}));

        assert_eq!(store.list("teams").len(), 1);
        assert_eq!(store.get("teams", "t1").unwrap()["name"], "Blue");

        assert!(store.delete("teams", "t1"));
        assert!(!store.delete("teams", "t1"));
        assert!(store.get("teams", "t1").is_none());
    }
}
