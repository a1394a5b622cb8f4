//! HTTP Handlers
//!
//! Controller layer: unwrap the request, call one use case, wrap the result
//! in the envelope. Failures leave as `AuthError` and are normalized by its
//! `IntoResponse`.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use kernel::envelope::Envelope;
use serde_json::Value;
use std::sync::Arc;

use crate::application::{
    AuthServices, GetUserUseCase, Principal, SignInOutput, SignInUseCase, SignUpUseCase, UserView,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthResult, LOGOUT_MESSAGE};
use crate::presentation::dto::{SignInRequest, SignUpRequest};

/// Shared state for user handlers and the token interceptor
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub services: Arc<AuthServices>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, services: AuthServices) -> Self {
        Self {
            repo: Arc::new(repo),
            services: Arc::new(services),
        }
    }
}

/// POST /api/users/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<Envelope<UserView>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body?;
    let use_case = SignUpUseCase::new(state.repo.clone(), state.services.clone());

    let user = use_case.execute(req.into()).await?;

    Ok(Envelope::ok("User registered successfully.", user))
}

/// POST /api/users/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> AuthResult<Envelope<SignInOutput>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body?;
    let use_case = SignInUseCase::new(state.repo.clone(), state.services.clone());

    let output = use_case.execute(req.into()).await?;

    Ok(Envelope::ok("User credentials verification successful.", output))
}

/// POST /api/users/logout
///
/// Tokens are not stored server-side, so there is nothing to revoke.
pub async fn logout(principal: Principal) -> Envelope<Value> {
    tracing::info!(user_id = %principal.id, "User logged out");
    Envelope::message_only(LOGOUT_MESSAGE)
}

/// GET /api/users/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
) -> AuthResult<Envelope<UserView>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetUserUseCase::new(state.repo.clone());
    let user = use_case.execute(principal.id).await?;

    Ok(Envelope::ok("User details fetched successfully.", user))
}
