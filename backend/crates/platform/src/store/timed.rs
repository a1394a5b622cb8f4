//! Timeout wrapper for any document store

use std::future::Future;
use std::time::Duration;

use super::{DeleteResult, Document, DocumentStore, Filter, FindOptions, StoreError, StoreResult};

/// Default bound for a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Bounds every call of the inner store with `tokio::time::timeout`
#[derive(Debug, Clone)]
pub struct TimedStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S> TimedStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.timeout, "Store call timed out");
                Err(StoreError::Timeout(self.timeout))
            }
        }
    }
}

impl<S> DocumentStore for TimedStore<S>
where
    S: DocumentStore + Sync,
{
    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Document>> {
        self.bounded("find_one", self.inner.find_one(collection, filter))
            .await
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> StoreResult<Vec<Document>> {
        self.bounded(
            "find_many",
            self.inner.find_many(collection, filter, options),
        )
        .await
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        self.bounded("count", self.inner.count(collection, filter))
            .await
    }

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<Document> {
        self.bounded("insert_one", self.inner.insert_one(collection, document))
            .await
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Document,
    ) -> StoreResult<Option<Document>> {
        self.bounded(
            "update_one",
            self.inner.update_one(collection, filter, patch),
        )
        .await
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> StoreResult<DeleteResult> {
        self.bounded("delete_one", self.inner.delete_one(collection, filter))
            .await
    }
}
