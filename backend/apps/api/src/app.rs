//! Router composition

use std::any::Any;

use auth::{AuthAppState, DocumentUserRepository, users_router};
use axum::{
    Router,
    http::{Method, header},
    response::{IntoResponse, Response},
};
use kernel::error::app_error::AppError;
use platform::store::DocumentStore;
use todo::{DocumentTodoRepository, TodoAppState, todos_router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;

/// Build the full application over one document store
pub fn build_router<S>(store: S, config: &ApiConfig) -> anyhow::Result<Router>
where
    S: DocumentStore + Clone + Send + Sync + 'static,
{
    let services = config.auth.build_services()?;

    let auth_state = AuthAppState::new(DocumentUserRepository::new(store.clone()), services);
    let todo_state = TodoAppState::new(DocumentTodoRepository::new(store));

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    Ok(Router::new()
        .nest("/api/users", users_router(auth_state.clone()))
        .nest("/api/todos", todos_router(todo_state, auth_state))
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

async fn route_not_found() -> AppError {
    AppError::not_found("API not found.")
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");

    AppError::conflict("Error while processing the request.").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use platform::password::HashCost;
    use platform::store::MemoryDocumentStore;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn router() -> Router {
        let mut config = ApiConfig::from_lookup(|_| None, true).unwrap();
        config.auth.hash_cost = HashCost::testing();
        build_router(DocumentUserRepository::<MemoryDocumentStore>::memory_store(), &config).unwrap()
    }

    async fn body(res: Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_route_is_enveloped() {
        let res = router()
            .oneshot(Request::get("/api/nothing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body(res).await,
            json!({"code": 404, "message": "API not found.", "data": null})
        );
    }

    #[tokio::test]
    async fn test_routes_are_nested() {
        let signup = Request::post("/api/users/signup")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"email": "jane@example.com", "password": "Secret#2024"}).to_string(),
            ))
            .unwrap();
        let res = router().oneshot(signup).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = router()
            .oneshot(Request::get("/api/todos").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(res).await["message"], "Token not found.");
    }

    #[tokio::test]
    async fn test_panic_becomes_conflict_envelope() {
        let app = Router::new()
            .route("/boom", axum::routing::get(|| async { panic!("boom") as () }))
            .layer(CatchPanicLayer::custom(panic_response));

        let res = app
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(body(res).await["code"], 409);
    }
}
