//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod get_user;
pub mod sign_in;
pub mod sign_up;
pub mod user_view;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateUseCase, Principal};
pub use config::{AuthConfig, AuthServices};
pub use get_user::GetUserUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use user_view::UserView;
