//! Sign Up Use Case
//!
//! Creates a new user account. Sign-up does not sign the user in: no token
//! is issued here.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthServices;
use crate::application::user_view::UserView;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    services: Arc<AuthServices>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, services: Arc<AuthServices>) -> Self {
        Self { repo, services }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<UserView> {
        let name = input
            .name
            .filter(|n| !n.trim().is_empty())
            .map(UserName::new)
            .transpose()?;
        let email = Email::new(input.email)?;
        let phone = input.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        // Argon2 is CPU-bound; keep it off the async workers
        let hasher = self.services.hasher.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

        let user = User::new(name, email, password_hash.into_phc_string(), phone);
        self.repo.create(&user).await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User signed up");

        Ok(UserView::from(&user))
    }
}
