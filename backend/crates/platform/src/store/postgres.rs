//! PostgreSQL document store
//!
//! All collections share one table:
//!
//! ```sql
//! documents(collection TEXT, id TEXT, body JSONB, PRIMARY KEY (collection, id))
//! ```
//!
//! Unique constraints live in the schema (see `database/migrations`), so the
//! database stays the arbiter for concurrent writers.

use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{
    Condition, DeleteResult, Document, DocumentStore, Filter, FindOptions, SortDirection,
    StoreError, StoreResult, document_id,
};

const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed document store
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Append `WHERE collection = $1 AND <conditions>`
fn push_where<'a>(builder: &mut QueryBuilder<'a, Postgres>, collection: &'a str, filter: &'a Filter) {
    builder.push(" WHERE collection = ");
    builder.push_bind(collection);

    for condition in filter.conditions() {
        builder.push(" AND ");
        match condition {
            Condition::Eq(field, Value::Null) => {
                builder.push("(body -> ");
                builder.push_bind(field.as_str());
                builder.push(" IS NULL OR body -> ");
                builder.push_bind(field.as_str());
                builder.push(" = 'null'::jsonb)");
            }
            Condition::Eq(field, value) => {
                builder.push("body -> ");
                builder.push_bind(field.as_str());
                builder.push(" = ");
                builder.push_bind(Json(value));
            }
            Condition::In(_, values) if values.is_empty() => {
                builder.push("FALSE");
            }
            Condition::In(field, values) => {
                builder.push("body -> ");
                builder.push_bind(field.as_str());
                builder.push(" IN (");
                let mut separated = builder.separated(", ");
                for value in values {
                    separated.push_bind(Json(value));
                }
                separated.push_unseparated(")");
            }
            Condition::Contains(field, text) => {
                builder.push("body ->> ");
                builder.push_bind(field.as_str());
                builder.push(" ILIKE ");
                builder.push_bind(format!("%{}%", escape_like(text)));
            }
        }
    }
}

/// Subquery selecting the id of the first document matching the filter
fn push_first_id<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    collection: &'a str,
    filter: &'a Filter,
) {
    builder.push("(SELECT id FROM documents");
    push_where(builder, collection, filter);
    builder.push(" ORDER BY created_at, id LIMIT 1)");
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn map_write_error(collection: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
    {
        let key = db_err.constraint().unwrap_or("id").to_string();
        return StoreError::DuplicateKey {
            collection: collection.to_string(),
            key,
        };
    }
    StoreError::Database(err)
}

fn into_documents(rows: Vec<Json<Document>>) -> Vec<Document> {
    rows.into_iter().map(|Json(doc)| doc).collect()
}

impl DocumentStore for PgDocumentStore {
    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Document>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT body FROM documents");
        push_where(&mut builder, collection, filter);
        builder.push(" ORDER BY created_at, id LIMIT 1");

        let row = builder
            .build_query_scalar::<Json<Document>>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|Json(doc)| doc))
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> StoreResult<Vec<Document>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT body FROM documents");
        push_where(&mut builder, collection, filter);

        builder.push(" ORDER BY ");
        if let Some(sort) = &options.sort {
            builder.push("body -> ");
            builder.push_bind(sort.field.as_str());
            builder.push(match sort.direction {
                SortDirection::Ascending => " ASC NULLS FIRST, ",
                SortDirection::Descending => " DESC NULLS LAST, ",
            });
        }
        builder.push("created_at, id");

        builder.push(" OFFSET ");
        builder.push_bind(i64::try_from(options.skip).unwrap_or(i64::MAX));
        if let Some(limit) = options.limit {
            builder.push(" LIMIT ");
            builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = builder
            .build_query_scalar::<Json<Document>>()
            .fetch_all(&self.pool)
            .await?;

        Ok(into_documents(rows))
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM documents");
        push_where(&mut builder, collection, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<Document> {
        let id = document_id(&document)?.to_string();

        let Json(stored) = sqlx::query_scalar::<_, Json<Document>>(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            RETURNING body
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(Json(&document))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(collection, e))?;

        tracing::debug!(collection, id = %id, "Document inserted");

        Ok(stored)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        mut patch: Document,
    ) -> StoreResult<Option<Document>> {
        patch.remove(super::ID_FIELD);

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE documents SET body = body || ");
        builder.push_bind(Json(patch));
        builder.push(", updated_at = now() WHERE collection = ");
        builder.push_bind(collection);
        builder.push(" AND id = ");
        push_first_id(&mut builder, collection, filter);
        builder.push(" RETURNING body");

        let row = builder
            .build_query_scalar::<Json<Document>>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, e))?;

        Ok(row.map(|Json(doc)| doc))
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> StoreResult<DeleteResult> {
        let mut builder = QueryBuilder::<Postgres>::new("DELETE FROM documents WHERE collection = ");
        builder.push_bind(collection);
        builder.push(" AND id = ");
        push_first_id(&mut builder, collection, filter);

        let deleted = builder.build().execute(&self.pool).await?.rows_affected();

        Ok(DeleteResult {
            deleted_count: deleted,
        })
    }
}
