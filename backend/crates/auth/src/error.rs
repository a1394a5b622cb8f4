//! Auth Error Types
//!
//! Auth-specific error variants. Every variant maps to a
//! `kernel::error::kind::ErrorKind` and renders as the `{code, message, data}`
//! envelope at the controller boundary.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::envelope::Envelope;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::store::StoreError;
use platform::token::TokenError;
use serde_json::{Value, json};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Acknowledgement sent when logging out with an already expired token
pub const LOGOUT_MESSAGE: &str = "User successfully logged out.";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input (body, name, email, password)
    #[error("{0}")]
    Validation(String),

    /// No id, email or phone to look a user up by
    #[error("No keys found to retrieve one user.")]
    MissingLookupKey,

    /// Email already registered
    #[error("User already exists with this email.")]
    EmailTaken,

    /// Unknown account or wrong password
    #[error("Invalid user credentials.")]
    InvalidCredentials,

    #[error("Yours account is locked.")]
    AccountLocked,

    #[error("User's email is not verified.")]
    EmailNotVerified,

    #[error("User is not authorized to login. Please contact your administrator.")]
    AccountDeleted,

    #[error("Unable to identify user's current status. Please contact your administrator.")]
    UnknownStatus,

    /// No token in query or Authorization header
    #[error("Token not found.")]
    TokenMissing,

    /// Token failed signature/format/expiry verification
    #[error("Invalid token.")]
    TokenInvalid,

    /// Token verified but carries no audience
    #[error("You are not authorized to access this API.")]
    MissingAudience,

    /// Token subject does not resolve to an account
    #[error("Invalid token! User not found.")]
    TokenUserNotFound,

    /// Expired token presented on a logout request
    ///
    /// Not a failure: rendered as a successful logout acknowledgement.
    #[error("User successfully logged out.")]
    ExpiredOnLogout,

    #[error("User not found.")]
    UserNotFound,

    #[error("Error while generating JWT token: {0}")]
    Token(#[source] TokenError),

    #[error("Error while hashing password: {0}")]
    PasswordHash(#[from] PasswordHashError),

    #[error("Error while hashing password: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Persistence failure
    #[error("Error while accessing user details: {0}")]
    Store(#[source] StoreError),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::MissingLookupKey | AuthError::TokenMissing => {
                ErrorKind::BadRequest
            }
            AuthError::InvalidCredentials
            | AuthError::TokenInvalid
            | AuthError::MissingAudience => ErrorKind::NotAuthenticated,
            AuthError::AccountLocked | AuthError::AccountDeleted => ErrorKind::Forbidden,
            AuthError::EmailNotVerified | AuthError::UnknownStatus => ErrorKind::NotAuthorized,
            AuthError::TokenUserNotFound | AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Store(StoreError::Timeout(_)) => ErrorKind::RequestTimeout,
            // Not an error on the wire; `into_response` special-cases it
            AuthError::ExpiredOnLogout => ErrorKind::Conflict,
            AuthError::EmailTaken
            | AuthError::Token(_)
            | AuthError::PasswordHash(_)
            | AuthError::Task(_)
            | AuthError::Store(_) => ErrorKind::Conflict,
        }
    }

    /// Failures the client cannot fix
    pub fn is_unexpected(&self) -> bool {
        match self {
            AuthError::Store(StoreError::Timeout(_)) => false,
            AuthError::Token(_)
            | AuthError::PasswordHash(_)
            | AuthError::Task(_)
            | AuthError::Store(_) => true,
            _ => false,
        }
    }

    /// Data attached to the failure envelope
    fn data(&self) -> Option<Value> {
        match self {
            AuthError::AccountLocked
            | AuthError::EmailNotVerified
            | AuthError::AccountDeleted
            | AuthError::UnknownStatus => Some(json!({})),
            _ => None,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self.data() {
            Some(data) => err.with_data(data),
            None => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            _ if self.is_unexpected() => {
                tracing::error!(error = %self, "Auth unexpected error");
            }
            AuthError::Store(StoreError::Timeout(timeout)) => {
                tracing::error!(?timeout, "User store timed out");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountLocked
            | AuthError::EmailNotVerified
            | AuthError::AccountDeleted
            | AuthError::UnknownStatus => {
                tracing::warn!(reason = %self, "Login attempt on inactive account");
            }
            AuthError::TokenInvalid | AuthError::MissingAudience | AuthError::TokenUserNotFound => {
                tracing::warn!(reason = %self, "Token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::ExpiredOnLogout = self {
            tracing::info!("Logout with expired token acknowledged");
            return Envelope::<Value>::message_only(LOGOUT_MESSAGE).into_response();
        }

        self.log();
        self.to_app_error().into_response()
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Store(err)
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}
