//! Delete Todo Use Case

use kernel::id::{TodoId, UserId};
use std::sync::Arc;

use crate::domain::repository::TodoRepository;
use crate::error::{TodoError, TodoResult};

pub struct DeleteTodoUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteTodoUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: UserId, id: TodoId) -> TodoResult<()> {
        if !self.repo.delete(&owner, &id).await? {
            return Err(TodoError::NotFound);
        }

        tracing::info!(todo_id = %id, owner = %owner, "Todo deleted");
        Ok(())
    }
}
