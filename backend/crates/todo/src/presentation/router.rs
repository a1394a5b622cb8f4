//! Todos Router

use auth::AuthAppState;
use auth::domain::repository::UserRepository;
use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::TodoRepository;
use crate::presentation::handlers::{self, TodoAppState};

/// Create the todos router; every route requires a bearer token
///
/// Nest under `/api/todos`. `auth` supplies the token interceptor.
pub fn todos_router<T, U>(state: TodoAppState<T>, auth: AuthAppState<U>) -> Router
where
    T: TodoRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let routes = Router::new()
        .route("/", post(handlers::create::<T>).get(handlers::list::<T>))
        .route("/search", post(handlers::search::<T>))
        .route(
            "/{id}",
            get(handlers::get_one::<T>)
                .put(handlers::update::<T>)
                .delete(handlers::delete::<T>),
        );

    auth::protect(routes, auth).with_state(state)
}
