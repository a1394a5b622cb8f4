//! Document Store
//!
//! Generic persistence contract used by the domain crates' service layer.
//! Records are JSON objects grouped into named collections; every record
//! carries a string `id` field.
//!
//! Implementations:
//! - [`MemoryDocumentStore`]: in-process, used by tests and when no database is configured
//! - [`PgDocumentStore`]: PostgreSQL `JSONB` table
//! - [`TimedStore`]: bounds every call of an inner store with a timeout

mod filter;
mod memory;
mod postgres;
mod timed;

use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;

pub use filter::{Condition, Filter, FindOptions, Sort, SortDirection};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use timed::{DEFAULT_STORE_TIMEOUT, TimedStore};

/// A stored record
pub type Document = Map<String, Value>;

/// Name of the identity field every document carries
pub const ID_FIELD: &str = "id";

/// Outcome of `delete_one`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write
    #[error("Duplicate value for unique key `{key}` in `{collection}`")]
    DuplicateKey { collection: String, key: String },

    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Rejected by the store for any other reason (e.g. missing `id`)
    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract
#[trait_variant::make(DocumentStore: Send)]
pub trait LocalDocumentStore {
    /// First document matching `filter`
    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Document>>;

    /// All documents matching `filter`, sorted then paged
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> StoreResult<Vec<Document>>;

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64>;

    /// Insert a new document; returns it as stored
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<Document>;

    /// Shallow-merge `patch` into the first matching document
    ///
    /// Returns the updated document, or `None` when nothing matched.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Document,
    ) -> StoreResult<Option<Document>>;

    async fn delete_one(&self, collection: &str, filter: &Filter) -> StoreResult<DeleteResult>;
}

/// Read the `id` field of a document
pub fn document_id(document: &Document) -> StoreResult<&str> {
    document
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Backend("Document is missing a string `id` field".to_string()))
}

/// Serialize a value into a [`Document`]
pub fn to_document<T: serde::Serialize>(value: &T) -> StoreResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Backend(format!(
            "Expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Deserialize a [`Document`] into a value
pub fn from_document<T: serde::de::DeserializeOwned>(document: Document) -> StoreResult<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
