//! List Todos Use Case

use kernel::id::UserId;
use std::sync::Arc;

use crate::domain::entities::Todo;
use crate::domain::repository::TodoRepository;
use crate::domain::value_objects::{Page, TodoQuery};
use crate::error::TodoResult;

pub struct ListTodosUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
}

impl<R> ListTodosUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every todo of `owner`, oldest first
    pub async fn execute(&self, owner: UserId) -> TodoResult<Vec<Todo>> {
        let page = Page {
            limit: None,
            ..Page::default()
        };
        self.repo
            .find_many(&TodoQuery::owned_by(owner), &page)
            .await
    }
}
