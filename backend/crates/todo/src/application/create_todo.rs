//! Create Todo Use Case

use kernel::id::UserId;
use std::sync::Arc;

use crate::domain::entities::Todo;
use crate::domain::repository::TodoRepository;
use crate::domain::value_objects::{TodoDates, TodoText};
use crate::error::TodoResult;

/// Input DTO for create todo
#[derive(Debug, Clone, Default)]
pub struct CreateTodoInput {
    pub name: String,
    pub title: String,
    pub text: Option<String>,
    pub dates: Option<TodoDates>,
}

/// Create Todo Use Case
pub struct CreateTodoUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
}

impl<R> CreateTodoUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: UserId, input: CreateTodoInput) -> TodoResult<Todo> {
        let name = TodoText::required(&input.name, "name")?;
        let title = TodoText::required(&input.title, "title")?;

        let todo = Todo::new(
            owner,
            name,
            title,
            input.text,
            input.dates.unwrap_or_default(),
        );
        self.repo.create(&todo).await?;

        tracing::info!(todo_id = %todo.id, owner = %owner, "Todo created");

        Ok(todo)
    }
}
