//! Users Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_logout_token, require_token};

/// Create the users router (`/signup`, `/signin`, `/logout`, `/me`)
///
/// Nest under `/api/users`.
pub fn users_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let logout = Router::new()
        .route("/logout", post(handlers::logout))
        .route_layer(from_fn_with_state(state.clone(), require_logout_token::<R>));

    let protected = Router::new()
        .route("/me", get(handlers::me::<R>))
        .route_layer(from_fn_with_state(state.clone(), require_token::<R>));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .merge(logout)
        .merge(protected)
        .with_state(state)
}

/// Put every route of `router` behind the token interceptor
pub fn protect<R, S>(router: Router<S>, state: AuthAppState<R>) -> Router<S>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(from_fn_with_state(state, require_token::<R>))
}
