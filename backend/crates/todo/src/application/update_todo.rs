//! Update Todo Use Case

use kernel::id::{TodoId, UserId};
use std::sync::Arc;

use crate::domain::entities::{Todo, TodoChanges};
use crate::domain::repository::TodoRepository;
use crate::domain::value_objects::{TodoDates, TodoText};
use crate::error::{TodoError, TodoResult};

/// Input DTO for update todo; name and title are required
#[derive(Debug, Clone, Default)]
pub struct UpdateTodoInput {
    pub name: String,
    pub title: String,
    pub text: Option<String>,
    pub dates: Option<TodoDates>,
}

pub struct UpdateTodoUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateTodoUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        id: TodoId,
        input: UpdateTodoInput,
    ) -> TodoResult<Todo> {
        let changes = TodoChanges::new(
            owner,
            TodoText::required(&input.name, "name")?,
            TodoText::required(&input.title, "title")?,
            input.text,
            input.dates,
        );

        let todo = self
            .repo
            .update(&owner, &id, &changes)
            .await?
            .ok_or(TodoError::NotFound)?;

        tracing::info!(todo_id = %id, owner = %owner, "Todo updated");

        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{repo, seed};

    fn input(title: &str) -> UpdateTodoInput {
        UpdateTodoInput {
            name: "groceries".to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_own_todo() {
        let repo = repo();
        let owner = UserId::new();
        let todo = seed(&repo, owner, "groceries", "Buy milk").await;

        let updated = UpdateTodoUseCase::new(repo)
            .execute(owner, todo.id, input("Buy oat milk"))
            .await
            .unwrap();

        assert_eq!(updated.id, todo.id);
        assert_eq!(updated.title.as_str(), "Buy oat milk");
        assert_eq!(updated.updated_by, Some(owner));
    }

    #[tokio::test]
    async fn test_update_foreign_todo_is_not_found() {
        let repo = repo();
        let todo = seed(&repo, UserId::new(), "groceries", "Buy milk").await;

        let err = UpdateTodoUseCase::new(repo)
            .execute(UserId::new(), todo.id, input("Mine now"))
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::NotFound));
    }

    #[tokio::test]
    async fn test_update_requires_name() {
        let repo = repo();
        let owner = UserId::new();
        let todo = seed(&repo, owner, "groceries", "Buy milk").await;

        let err = UpdateTodoUseCase::new(repo)
            .execute(
                owner,
                todo.id,
                UpdateTodoInput {
                    name: String::new(),
                    ..input("Buy milk")
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
    }
}
