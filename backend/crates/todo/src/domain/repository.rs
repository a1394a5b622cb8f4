//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Every lookup is scoped to the owning account.

use kernel::id::{TodoId, UserId};

use crate::domain::entities::{Todo, TodoChanges};
use crate::domain::value_objects::{Page, TodoQuery};
use crate::error::TodoResult;

/// Todo repository trait
#[trait_variant::make(TodoRepository: Send)]
pub trait LocalTodoRepository {
    /// Persist a new todo
    async fn create(&self, todo: &Todo) -> TodoResult<()>;

    /// Get one todo of `owner`
    async fn find_one(&self, owner: &UserId, id: &TodoId) -> TodoResult<Option<Todo>>;

    /// Todos matching `query`, ordered by creation time
    async fn find_many(&self, query: &TodoQuery, page: &Page) -> TodoResult<Vec<Todo>>;

    /// Number of todos matching `query`, ignoring paging
    async fn count(&self, query: &TodoQuery) -> TodoResult<u64>;

    /// Apply `changes`; `None` if the todo does not exist for `owner`
    async fn update(
        &self,
        owner: &UserId,
        id: &TodoId,
        changes: &TodoChanges,
    ) -> TodoResult<Option<Todo>>;

    /// Returns whether a todo was removed
    async fn delete(&self, owner: &UserId, id: &TodoId) -> TodoResult<bool>;
}
