//! Document Store Repository Implementation

use kernel::id::{TodoId, UserId};
use platform::store::{
    Document, DocumentStore, Filter, FindOptions, ID_FIELD, MemoryDocumentStore, Sort,
    from_document, to_document,
};
use serde::Serialize;

use crate::domain::entities::{Todo, TodoChanges};
use crate::domain::repository::TodoRepository;
use crate::domain::value_objects::{Page, TodoDates, TodoQuery, TodoText};
use crate::error::TodoResult;

/// Collection holding todo records
pub const TODOS_COLLECTION: &str = "todos";

const OWNER_FIELD: &str = "createdBy";
const CREATED_AT_FIELD: &str = "createdAt";

/// Todo repository backed by any document store
#[derive(Debug, Clone)]
pub struct DocumentTodoRepository<S> {
    store: S,
}

impl<S> DocumentTodoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl DocumentTodoRepository<MemoryDocumentStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryDocumentStore::new())
    }
}

/// Stored shape of an update; absent fields are left untouched
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TodoPatch<'a> {
    name: &'a TodoText,
    title: &'a TodoText,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dates: Option<&'a TodoDates>,
    updated_by: UserId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> From<&'a TodoChanges> for TodoPatch<'a> {
    fn from(changes: &'a TodoChanges) -> Self {
        Self {
            name: &changes.name,
            title: &changes.title,
            text: changes.text.as_deref(),
            dates: changes.dates.as_ref(),
            updated_by: changes.updated_by,
            updated_at: changes.updated_at,
        }
    }
}

fn owned(owner: &UserId, id: &TodoId) -> Filter {
    Filter::by_id(id.to_string()).eq(OWNER_FIELD, owner.to_string())
}

fn query_filter(query: &TodoQuery) -> Filter {
    let mut filter = Filter::new().eq(OWNER_FIELD, query.owner.to_string());

    if !query.ids.is_empty() {
        filter = filter.is_in(ID_FIELD, query.ids.iter().map(|id| id.to_string()));
    }
    if let Some(name) = &query.name {
        filter = filter.contains("name", name.as_str());
    }
    if let Some(title) = &query.title {
        filter = filter.contains("title", title.as_str());
    }

    filter
}

fn find_options(page: &Page) -> FindOptions {
    let options = FindOptions::new()
        .sort(Sort::new(CREATED_AT_FIELD, page.order))
        .skip(page.skip);

    match page.limit {
        Some(limit) => options.limit(limit),
        None => options,
    }
}

fn into_todos(documents: Vec<Document>) -> TodoResult<Vec<Todo>> {
    documents
        .into_iter()
        .map(|doc| from_document::<Todo>(doc).map_err(Into::into))
        .collect()
}

impl<S> TodoRepository for DocumentTodoRepository<S>
where
    S: DocumentStore + Sync,
{
    async fn create(&self, todo: &Todo) -> TodoResult<()> {
        self.store
            .insert_one(TODOS_COLLECTION, to_document(todo)?)
            .await?;
        Ok(())
    }

    async fn find_one(&self, owner: &UserId, id: &TodoId) -> TodoResult<Option<Todo>> {
        let document = self
            .store
            .find_one(TODOS_COLLECTION, &owned(owner, id))
            .await?;

        Ok(document.map(from_document::<Todo>).transpose()?)
    }

    async fn find_many(&self, query: &TodoQuery, page: &Page) -> TodoResult<Vec<Todo>> {
        let documents = self
            .store
            .find_many(TODOS_COLLECTION, &query_filter(query), &find_options(page))
            .await?;

        into_todos(documents)
    }

    async fn count(&self, query: &TodoQuery) -> TodoResult<u64> {
        Ok(self
            .store
            .count(TODOS_COLLECTION, &query_filter(query))
            .await?)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &TodoId,
        changes: &TodoChanges,
    ) -> TodoResult<Option<Todo>> {
        let patch = to_document(&TodoPatch::from(changes))?;
        let document = self
            .store
            .update_one(TODOS_COLLECTION, &owned(owner, id), patch)
            .await?;

        Ok(document.map(from_document::<Todo>).transpose()?)
    }

    async fn delete(&self, owner: &UserId, id: &TodoId) -> TodoResult<bool> {
        let result = self
            .store
            .delete_one(TODOS_COLLECTION, &owned(owner, id))
            .await?;

        Ok(result.deleted_count > 0)
    }
}
