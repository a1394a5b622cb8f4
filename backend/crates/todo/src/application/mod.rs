//! Application Layer - Use cases
//!
//! Each use case acts on behalf of one authenticated account and only
//! ever sees that account's todos.

pub mod create_todo;
pub mod delete_todo;
pub mod get_todo;
pub mod list_todos;
pub mod search_todos;
pub mod update_todo;

pub use create_todo::{CreateTodoInput, CreateTodoUseCase};
pub use delete_todo::DeleteTodoUseCase;
pub use get_todo::GetTodoUseCase;
pub use list_todos::ListTodosUseCase;
pub use search_todos::{SearchTodosInput, SearchTodosOutput, SearchTodosUseCase};
pub use update_todo::{UpdateTodoInput, UpdateTodoUseCase};
