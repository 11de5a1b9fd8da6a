// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed document store handle shared by all request handlers.
//!
//! Provides generic operations over any [`Document`] type:
//! - lookup by id, full listing, and string field equality queries
//! - insert (id + timestamps assigned here) and replace
//! - single and bulk deletes

use super::firestore::FirestoreBackend;
use super::memory::MemoryBackend;
use crate::db::Document;
use crate::error::AppError;
use serde_json::Value;

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreBackend),
    Memory(MemoryBackend),
}

/// Document database client.
#[derive(Clone)]
pub struct Datastore {
    backend: Backend,
}

impl Datastore {
    /// Connect to Firestore (or the emulator, if configured).
    pub async fn firestore(project_id: &str) -> Result<Self, AppError> {
        Ok(Self {
            backend: Backend::Firestore(FirestoreBackend::connect(project_id).await?),
        })
    }

    /// Create an empty process-local store (development and tests).
    pub fn in_memory() -> Self {
        tracing::info!("Using in-memory document store");
        Self {
            backend: Backend::Memory(MemoryBackend::default()),
        }
    }

    /// Get a document by id.
    pub async fn get<T: Document>(&self, id: &str) -> Result<Option<T>, AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.get(id).await,
            Backend::Memory(mem) => mem
                .get(T::COLLECTION, id)
                .map(from_value::<T>)
                .transpose(),
        }
    }

    /// Get a document by id, failing with `NotFound`.
    pub async fn fetch<T: Document>(&self, kind: &str, id: &str) -> Result<T, AppError> {
        self.get(id)
            .await?
            .ok_or_else(|| AppError::not_found(kind, id))
    }

    /// All documents of a collection.
    pub async fn list<T: Document>(&self) -> Result<Vec<T>, AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.list().await,
            Backend::Memory(mem) => mem
                .list(T::COLLECTION)
                .into_iter()
                .map(from_value::<T>)
                .collect(),
        }
    }

    /// All documents whose string `field` equals `value`.
    pub async fn query_eq<T: Document>(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<Vec<T>, AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.query_eq(field, value).await,
            Backend::Memory(mem) => mem
                .query_eq(T::COLLECTION, field, value)
                .into_iter()
                .map(from_value::<T>)
                .collect(),
        }
    }

    /// Store a new document, assigning its id and timestamps.
    pub async fn insert<T: Document>(&self, mut doc: T) -> Result<T, AppError> {
        let now = chrono::Utc::now();
        doc.assign_id(uuid::Uuid::new_v4().to_string(), now);
        doc.touch(now);
        self.write(&doc).await?;
        Ok(doc)
    }

    /// Overwrite an existing document, refreshing `updated_at`.
    pub async fn replace<T: Document>(&self, mut doc: T) -> Result<T, AppError> {
        doc.touch(chrono::Utc::now());
        self.write(&doc).await?;
        Ok(doc)
    }

    async fn write<T: Document>(&self, doc: &T) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.set(doc).await,
            Backend::Memory(mem) => {
                mem.set(T::COLLECTION, doc.id(), to_value(doc)?);
                Ok(())
            }
        }
    }

    /// Delete one document. Deleting a missing document is not an error.
    pub async fn delete<T: Document>(&self, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.delete(T::COLLECTION, id).await,
            Backend::Memory(mem) => {
                mem.delete(T::COLLECTION, id);
                Ok(())
            }
        }
    }

    /// Delete the given documents, returning how many ids were submitted.
    pub async fn delete_all<T: Document>(&self, docs: &[T]) -> Result<usize, AppError> {
        let ids: Vec<String> = docs.iter().map(|d| d.id().to_string()).collect();
        match &self.backend {
            Backend::Firestore(fs) => fs.batch_delete(T::COLLECTION, &ids).await?,
            Backend::Memory(mem) => {
                for id in &ids {
                    mem.delete(T::COLLECTION, id);
                }
            }
        }
        Ok(ids.len())
    }
}

fn to_value<T: Document>(doc: &T) -> Result<Value, AppError> {
    serde_json::to_value(doc).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "Failed to encode {} document: {}",
            T::COLLECTION,
            e
        ))
    })
}

fn from_value<T: Document>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| {
        AppError::Database(format!("Corrupt {} document: {}", T::COLLECTION, e))
    })
}
