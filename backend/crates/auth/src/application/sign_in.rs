//! Sign In Use Case
//!
//! Verifies credentials, gates on account status and issues a bearer token.

use std::sync::Arc;

use chrono::Utc;
use platform::password::ClearTextPassword;
use platform::token::TokenRequest;
use serde::Serialize;

use crate::application::config::AuthServices;
use crate::application::user_view::UserView;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_lookup::UserLookup, user_status::UserStatus};
use crate::error::{AuthError, AuthResult};

/// Audience of tokens minted at sign-in
pub const USER_AUDIENCE: &str = "user";

/// Subject label of tokens minted at sign-in
pub const USER_TOKEN_SUBJECT: &str = "User Token";

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Account record merged with the freshly issued token
#[derive(Debug, Clone, Serialize)]
pub struct SignInOutput {
    #[serde(flatten)]
    pub user: UserView,
    pub token: String,
    /// Unix seconds
    pub token_expiry: u64,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    services: Arc<AuthServices>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, services: Arc<AuthServices>) -> Self {
        Self { repo, services }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let lookup =
            UserLookup::from_fields(None, Some(&input.email), None).ok_or(AuthError::MissingLookupKey)?;

        // Unknown account and wrong password are indistinguishable to the caller
        let mut user = self
            .repo
            .find_one(&lookup)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(input.password);
        let hasher = self.services.hasher.clone();
        let stored_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash)).await?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        ensure_can_login(user.status)?;

        let issued = self
            .services
            .tokens
            .issue(&TokenRequest {
                subject_id: user.id.to_string(),
                audience: Some(USER_AUDIENCE.to_string()),
                subject: Some(USER_TOKEN_SUBJECT.to_string()),
            })
            .map_err(AuthError::Token)?;

        let now = Utc::now();
        self.repo.record_login(&user.id, now).await?;
        user.record_login(now);

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput {
            user: UserView::from(&user),
            token: issued.token,
            token_expiry: issued.expires_at,
        })
    }
}

/// Only `Active` accounts may sign in
fn ensure_can_login(status: UserStatus) -> AuthResult<()> {
    match status {
        UserStatus::Active => Ok(()),
        UserStatus::Locked => Err(AuthError::AccountLocked),
        UserStatus::NotVerified => Err(AuthError::EmailNotVerified),
        UserStatus::Deleted => Err(AuthError::AccountDeleted),
        UserStatus::Unknown => Err(AuthError::UnknownStatus),
    }
}
