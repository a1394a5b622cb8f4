//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the token interceptor.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::require_token;
pub use router::{protect, users_router};
