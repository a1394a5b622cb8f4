//! Token Interceptor
//!
//! Guards protected routes: extracts the bearer token, hands it to
//! [`AuthenticateUseCase`] and attaches the resulting [`Principal`] to the
//! request extensions.

use axum::body::Body;
use axum::extract::{FromRequestParts, Query, State};
use axum::http::{HeaderMap, Request, header, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;

use crate::application::{AuthenticateInput, AuthenticateUseCase, Principal};
use crate::domain::repository::UserRepository;
use crate::presentation::dto::TokenQuery;
use crate::presentation::handlers::AuthAppState;

const BEARER_SCHEME: &str = "bearer";

/// Middleware that requires a valid bearer token
///
/// Apply with `axum::middleware::from_fn_with_state(state, require_token::<R>)`.
/// Logout intent comes from the `isLogout` query flag.
pub async fn require_token<R>(
    State(state): State<AuthAppState<R>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    intercept(state, req, next, false).await
}

/// [`require_token`] for logout routes
///
/// The route itself carries logout intent, so an expired token is
/// acknowledged even without `isLogout`.
pub async fn require_logout_token<R>(
    State(state): State<AuthAppState<R>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    intercept(state, req, next, true).await
}

async fn intercept<R>(
    state: AuthAppState<R>,
    mut req: Request<Body>,
    next: Next,
    logout_route: bool,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let query = Query::<TokenQuery>::try_from_uri(req.uri())
        .map(|Query(q)| q)
        .unwrap_or_default();

    let input = AuthenticateInput {
        token: query
            .token()
            .map(str::to_string)
            .or_else(|| bearer_token(req.headers())),
        is_logout: logout_route || query.is_logout(),
    };

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.services.clone());

    match use_case.execute(input).await {
        Ok(principal) => {
            tracing::debug!(user_id = %principal.id, audience = %principal.audience, "Token accepted");
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

/// Token from `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = value.split_whitespace();
    let (scheme, token) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    Some(token.to_string())
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| AppError::not_authenticated("You are not authorized to access this API."))
    }
}
