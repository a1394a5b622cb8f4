//! Todo Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Todo entity, value objects, repository trait
//! - `application/` - Use cases (create, get, list, update, delete, search)
//! - `infra/` - Document store implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Every route sits behind the `auth` token interceptor, and every use case
//! is scoped to the authenticated account: another account's todo is
//! reported as not found.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{TodoError, TodoResult};
pub use infra::document::DocumentTodoRepository;
pub use presentation::handlers::TodoAppState;
pub use presentation::router::todos_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
