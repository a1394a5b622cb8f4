//! Auth (Users) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases (sign-up, sign-in, token authentication)
//! - `infra/` - Document store implementation of the repository
//! - `presentation/` - HTTP handlers, DTOs, router, token interceptor
//!
//! ## Features
//! - User sign-up with email + password and optional name/phone
//! - Sign-in issuing a 24h HS256 bearer token
//! - Account status gating (Active / Locked / Not_verified / Deleted)
//! - `require_token` interceptor for any protected router
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never returned in a response
//! - Unknown account and wrong password are indistinguishable to the caller
//! - Tokens are stateless; expiry is the only termination mechanism

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{AuthConfig, AuthServices};
pub use application::Principal;
pub use error::{AuthError, AuthResult};
pub use infra::document::DocumentUserRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::require_token;
pub use presentation::router::{protect, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};

pub mod models {
    pub use crate::application::user_view::UserView;
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
