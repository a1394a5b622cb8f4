//! Get Todo Use Case

use kernel::id::{TodoId, UserId};
use std::sync::Arc;

use crate::domain::entities::Todo;
use crate::domain::repository::TodoRepository;
use crate::error::{TodoError, TodoResult};

pub struct GetTodoUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
}

impl<R> GetTodoUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: UserId, id: TodoId) -> TodoResult<Todo> {
        self.repo
            .find_one(&owner, &id)
            .await?
            .ok_or(TodoError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{repo, seed};

    #[tokio::test]
    async fn test_foreign_todo_is_not_found() {
        let repo = repo();
        let owner = UserId::new();
        let todo = seed(&repo, owner, "groceries", "Buy milk").await;
        let use_case = GetTodoUseCase::new(repo);

        assert_eq!(use_case.execute(owner, todo.id).await.unwrap(), todo);
        assert!(matches!(
            use_case.execute(UserId::new(), todo.id).await,
            Err(TodoError::NotFound)
        ));
        assert!(matches!(
            use_case.execute(owner, TodoId::new()).await,
            Err(TodoError::NotFound)
        ));
    }
}
