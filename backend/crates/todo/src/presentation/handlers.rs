//! HTTP Handlers

use auth::Principal;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use kernel::envelope::Envelope;
use kernel::id::TodoId;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::application::{
    CreateTodoUseCase, DeleteTodoUseCase, GetTodoUseCase, ListTodosUseCase, SearchTodosOutput,
    SearchTodosUseCase, UpdateTodoUseCase,
};
use crate::domain::entities::Todo;
use crate::domain::repository::TodoRepository;
use crate::error::{TodoError, TodoResult};
use crate::presentation::dto::{SearchTodosRequest, TodoRequest};

/// Shared state for todo handlers
#[derive(Clone)]
pub struct TodoAppState<R>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> TodoAppState<R>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

fn parse_id(raw: &str) -> TodoResult<TodoId> {
    raw.parse().map_err(|_| TodoError::InvalidId)
}

/// POST /api/todos
pub async fn create<R>(
    State(state): State<TodoAppState<R>>,
    principal: Principal,
    body: Result<Json<TodoRequest>, JsonRejection>,
) -> TodoResult<Envelope<Todo>>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body?;
    let todo = CreateTodoUseCase::new(state.repo.clone())
        .execute(principal.id, req.into())
        .await?;

    Ok(Envelope::ok("Todo details created successfully.", todo))
}

/// GET /api/todos
pub async fn list<R>(
    State(state): State<TodoAppState<R>>,
    principal: Principal,
) -> TodoResult<Envelope<Vec<Todo>>>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let todos = ListTodosUseCase::new(state.repo.clone())
        .execute(principal.id)
        .await?;

    Ok(Envelope::ok("Todos details retrieved successfully.", todos))
}

/// POST /api/todos/search
pub async fn search<R>(
    State(state): State<TodoAppState<R>>,
    principal: Principal,
    body: Result<Json<SearchTodosRequest>, JsonRejection>,
) -> TodoResult<Envelope<SearchTodosOutput>>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body?;
    let output = SearchTodosUseCase::new(state.repo.clone())
        .execute(principal.id, req.into())
        .await?;

    let message = if output.todos.is_empty() {
        "No todo found matching the search criteria."
    } else {
        "Todo details retrieved successfully."
    };

    Ok(Envelope::ok(message, output))
}

/// GET /api/todos/{id}
pub async fn get_one<R>(
    State(state): State<TodoAppState<R>>,
    principal: Principal,
    Path(id): Path<String>,
) -> TodoResult<Envelope<Todo>>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let todo = GetTodoUseCase::new(state.repo.clone())
        .execute(principal.id, parse_id(&id)?)
        .await?;

    Ok(Envelope::ok("Todo details fetched successfully.", todo))
}

/// PUT /api/todos/{id}
pub async fn update<R>(
    State(state): State<TodoAppState<R>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<TodoRequest>, JsonRejection>,
) -> TodoResult<Envelope<Todo>>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let Json(req) = body?;
    let todo = UpdateTodoUseCase::new(state.repo.clone())
        .execute(principal.id, id, req.into())
        .await?;

    Ok(Envelope::ok("Todo updated successfully.", todo))
}

/// DELETE /api/todos/{id}
pub async fn delete<R>(
    State(state): State<TodoAppState<R>>,
    principal: Principal,
    Path(id): Path<String>,
) -> TodoResult<Envelope<Value>>
where
    R: TodoRepository + Clone + Send + Sync + 'static,
{
    DeleteTodoUseCase::new(state.repo.clone())
        .execute(principal.id, parse_id(&id)?)
        .await?;

    Ok(Envelope::ok("One todo details deleted successfully.", json!({})))
}
