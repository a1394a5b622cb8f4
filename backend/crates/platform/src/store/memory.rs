//! In-memory document store

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use super::{
    DeleteResult, Document, DocumentStore, Filter, FindOptions, StoreError, StoreResult,
    document_id,
};

#[derive(Debug, Default)]
struct Inner {
    /// Documents per collection, in insertion order
    collections: HashMap<String, Vec<Document>>,
    /// Unique fields per collection
    unique: HashMap<String, Vec<String>>,
}

/// `RwLock`-guarded collections with optional unique indexes
///
/// Unique string values are compared case-insensitively, matching the
/// `lower(...)` index of the PostgreSQL store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a unique index on `collection.field`
    pub fn with_unique_index(self, collection: &str, field: &str) -> Self {
        // Fresh store: nothing else holds the lock yet
        if let Ok(mut inner) = self.inner.try_write() {
            inner
                .unique
                .entry(collection.to_string())
                .or_default()
                .push(field.to_string());
        }
        self
    }
}

impl Inner {
    fn violated_key(
        &self,
        collection: &str,
        candidate: &Document,
        ignore_id: Option<&str>,
    ) -> Option<String> {
        let fields = self.unique.get(collection)?;
        let documents = self.collections.get(collection)?;

        fields
            .iter()
            .find(|field| {
                let Some(value) = candidate.get(field.as_str()).filter(|v| !v.is_null()) else {
                    return false;
                };
                documents
                    .iter()
                    .filter(|doc| ignore_id.is_none_or(|id| document_id(doc).ok() != Some(id)))
                    .any(|doc| doc.get(field.as_str()).is_some_and(|v| same_key(v, value)))
            })
            .cloned()
    }
}

fn same_key(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.to_lowercase() == y.to_lowercase(),
        _ => a == b,
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Document>> {
        let inner = self.inner.read().await;
        Ok(inner
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)))
            .cloned())
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> StoreResult<Vec<Document>> {
        let inner = self.inner.read().await;
        let Some(docs) = inner.collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<&Document> = docs.iter().filter(|doc| filter.matches(doc)).collect();
        if let Some(sort) = &options.sort {
            matched.sort_by(|a, b| sort.compare(a, b));
        }

        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let limit = options
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        Ok(matched.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let inner = self.inner.read().await;
        let count = inner
            .collections
            .get(collection)
            .map_or(0, |docs| docs.iter().filter(|doc| filter.matches(doc)).count());
        Ok(count as u64)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<Document> {
        let id = document_id(&document)?.to_string();
        let mut inner = self.inner.write().await;

        let id_taken = inner
            .collections
            .get(collection)
            .is_some_and(|docs| docs.iter().any(|d| document_id(d).ok() == Some(id.as_str())));
        if id_taken {
            return Err(StoreError::DuplicateKey {
                collection: collection.to_string(),
                key: super::ID_FIELD.to_string(),
            });
        }

        if let Some(key) = inner.violated_key(collection, &document, None) {
            return Err(StoreError::DuplicateKey {
                collection: collection.to_string(),
                key,
            });
        }

        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        mut patch: Document,
    ) -> StoreResult<Option<Document>> {
        // The identity of a stored document never changes
        patch.remove(super::ID_FIELD);

        let mut inner = self.inner.write().await;
        let Some(position) = inner
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().position(|doc| filter.matches(doc)))
        else {
            return Ok(None);
        };

        let mut updated = inner.collections[collection][position].clone();
        updated.extend(patch);

        let id = document_id(&updated)?.to_string();
        if let Some(key) = inner.violated_key(collection, &updated, Some(&id)) {
            return Err(StoreError::DuplicateKey {
                collection: collection.to_string(),
                key,
            });
        }

        if let Some(docs) = inner.collections.get_mut(collection) {
            docs[position] = updated.clone();
        }

        Ok(Some(updated))
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> StoreResult<DeleteResult> {
        let mut inner = self.inner.write().await;
        let Some(docs) = inner.collections.get_mut(collection) else {
            return Ok(DeleteResult::default());
        };

        match docs.iter().position(|doc| filter.matches(doc)) {
            Some(position) => {
                docs.remove(position);
                Ok(DeleteResult { deleted_count: 1 })
            }
            None => Ok(DeleteResult::default()),
        }
    }
}
