//! Todo Error Types
//!
//! Todo-specific error variants that integrate with the unified
//! `kernel::error::AppError` system and render as the envelope.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::store::StoreError;
use thiserror::Error;

/// Todo-specific result type alias
pub type TodoResult<T> = Result<T, TodoError>;

/// Todo-specific error variants
#[derive(Debug, Error)]
pub enum TodoError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Path or search id is not a todo id
    #[error("Invalid todo id.")]
    InvalidId,

    /// Absent, or owned by someone else
    #[error("Todo details not found.")]
    NotFound,

    /// Search request without any filter
    #[error("No search keys found.")]
    NoSearchKeys,

    /// Persistence failure
    #[error("Error while accessing todo details: {0}")]
    Store(#[from] StoreError),
}

impl TodoError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Validation(_) | TodoError::InvalidId | TodoError::NoSearchKeys => {
                ErrorKind::BadRequest
            }
            TodoError::NotFound => ErrorKind::NotFound,
            TodoError::Store(StoreError::Timeout(_)) => ErrorKind::RequestTimeout,
            TodoError::Store(_) => ErrorKind::Conflict,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            TodoError::Store(StoreError::Timeout(timeout)) => {
                tracing::error!(?timeout, "Todo store timed out");
            }
            TodoError::Store(e) => {
                tracing::error!(error = %e, "Todo store error");
            }
            _ => {
                tracing::debug!(error = %self, "Todo error");
            }
        }
    }
}

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        AppError::new(err.kind(), err.to_string())
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<JsonRejection> for TodoError {
    fn from(rejection: JsonRejection) -> Self {
        TodoError::Validation(rejection.body_text())
    }
}
