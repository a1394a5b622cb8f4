//! HTTP-level tests for the users router and the token interceptor

use std::time::{SystemTime, UNIX_EPOCH};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use platform::store::{Document, DocumentStore, Filter, MemoryDocumentStore};
use platform::token::TokenRequest;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::sign_in::{USER_AUDIENCE, USER_TOKEN_SUBJECT};
use crate::{AuthAppState, AuthConfig, DocumentUserRepository, users_router};

const PASSWORD: &str = "Secret#2024";

struct TestApp {
    state: AuthAppState<DocumentUserRepository<MemoryDocumentStore>>,
    store: MemoryDocumentStore,
}

impl TestApp {
    fn new() -> Self {
        let store = DocumentUserRepository::<MemoryDocumentStore>::memory_store();
        let repo = DocumentUserRepository::new(store.clone());
        let services = AuthConfig::testing().build_services().unwrap();

        Self {
            state: AuthAppState::new(repo, services),
            store,
        }
    }

    fn router(&self) -> Router {
        users_router(self.state.clone())
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let res = self.router().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn sign_up(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/signup",
                json!({"name": "Jane Doe", "email": email, "password": PASSWORD}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn sign_in(&self, email: &str) -> String {
        let (status, body) = self
            .post("/signin", json!({"email": email, "password": PASSWORD}))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn set_status(&self, id: &str, status: &str) {
        let mut patch = Document::new();
        patch.insert("status".to_string(), json!(status));
        self.store
            .update_one("users", &Filter::by_id(id), patch)
            .await
            .unwrap()
            .unwrap();
    }

    fn expired_token(&self, id: &str) -> String {
        let two_days_ago = now_millis() - 2 * 24 * 60 * 60 * 1000;
        let request = TokenRequest {
            subject_id: id.to_string(),
            audience: Some(USER_AUDIENCE.to_string()),
            subject: Some(USER_TOKEN_SUBJECT.to_string()),
        };
        self.state
            .services
            .tokens
            .issue_at(&request, two_days_ago)
            .unwrap()
            .token
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

// ============================================================================
// Sign Up / Sign In
// ============================================================================

#[tokio::test]
async fn test_sign_up_returns_user_without_password() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/signup",
            json!({"name": "Jane Doe", "email": "Jane@Example.com", "password": PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "User registered successfully.");
    assert_eq!(body["data"]["email"], "jane@example.com");
    assert_eq!(body["data"]["status"], "Active");
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("token").is_none());
}

#[tokio::test]
async fn test_sign_up_duplicate_email_is_conflict() {
    let app = TestApp::new();
    app.sign_up("jane@example.com").await;

    let (status, body) = app
        .post(
            "/signup",
            json!({"email": "JANE@example.com", "password": PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
    assert_eq!(body["message"], "User already exists with this email.");
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_invalid_json_body_is_bad_request_envelope() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Request::post("/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_sign_in_returns_token_and_expiry() {
    let app = TestApp::new();
    let id = app.sign_up("jane@example.com").await;

    let (status, body) = app
        .post(
            "/signin",
            json!({"email": "jane@example.com", "password": PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User credentials verification successful.");
    assert_eq!(body["data"]["id"], id.as_str());
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["data"]["token_expiry"].as_u64().is_some());
    assert!(body["data"]["lastLoginAt"].as_i64().is_some());
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_sign_in_wrong_password_and_unknown_user_look_the_same() {
    let app = TestApp::new();
    app.sign_up("jane@example.com").await;

    let (wrong_status, wrong) = app
        .post(
            "/signin",
            json!({"email": "jane@example.com", "password": "Wrong#2024"}),
        )
        .await;
    let (unknown_status, unknown) = app
        .post(
            "/signin",
            json!({"email": "john@example.com", "password": PASSWORD}),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong["message"], "Invalid user credentials.");
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn test_sign_in_locked_account_is_forbidden() {
    let app = TestApp::new();
    let id = app.sign_up("jane@example.com").await;
    app.set_status(&id, "Locked").await;

    let (status, body) = app
        .post(
            "/signin",
            json!({"email": "jane@example.com", "password": PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Yours account is locked.");
    assert_eq!(body["data"], json!({}));
}

#[tokio::test]
async fn test_sign_in_not_verified_account() {
    let app = TestApp::new();
    let id = app.sign_up("jane@example.com").await;
    app.set_status(&id, "Not_verified").await;

    let (status, body) = app
        .post(
            "/signin",
            json!({"email": "jane@example.com", "password": PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User's email is not verified.");
}

// ============================================================================
// Token Interceptor
// ============================================================================

#[tokio::test]
async fn test_protected_route_without_token_is_bad_request() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/me")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Token not found.");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/me?token=not-a-jwt")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token.");
}

#[tokio::test]
async fn test_me_with_bearer_header() {
    let app = TestApp::new();
    let id = app.sign_up("jane@example.com").await;
    let token = app.sign_in("jane@example.com").await;

    for scheme in ["Bearer", "bearer"] {
        let (status, body) = app
            .send(
                Request::get("/me")
                    .header(header::AUTHORIZATION, format!("{scheme} {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "{scheme}");
        assert_eq!(body["message"], "User details fetched successfully.");
        assert_eq!(body["data"]["id"], id.as_str());
        assert!(body["data"].get("password").is_none());
    }
}

#[tokio::test]
async fn test_me_with_query_token() {
    let app = TestApp::new();
    app.sign_up("jane@example.com").await;
    let token = app.sign_in("jane@example.com").await;

    for name in ["token", "access_token", "app_token"] {
        let (status, _) = app.send(get(&format!("/me?{name}={token}"))).await;
        assert_eq!(status, StatusCode::OK, "{name}");
    }
}

#[tokio::test]
async fn test_token_for_removed_user_is_not_found() {
    let app = TestApp::new();
    let id = app.sign_up("jane@example.com").await;
    let token = app.sign_in("jane@example.com").await;

    let deleted = app
        .store
        .delete_one("users", &Filter::by_id(id.as_str()))
        .await
        .unwrap();
    assert_eq!(deleted.deleted_count, 1);

    let (status, body) = app.send(get(&format!("/me?token={token}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invalid token! User not found.");
}

#[tokio::test]
async fn test_logout_with_valid_token() {
    let app = TestApp::new();
    app.sign_up("jane@example.com").await;
    let token = app.sign_in("jane@example.com").await;

    let (status, body) = app
        .send(
            Request::post(format!("/logout?token={token}&isLogout=true"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"code": 200, "message": "User successfully logged out.", "data": null})
    );
}

#[tokio::test]
async fn test_expired_token_on_logout_is_acknowledged() {
    let app = TestApp::new();
    let id = app.sign_up("jane@example.com").await;
    let expired = app.expired_token(&id);

    let (status, body) = app
        .send(
            Request::post(format!("/logout?token={expired}&isLogout=true"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "User successfully logged out.");
}

#[tokio::test]
async fn test_expired_token_on_logout_route_needs_no_flag() {
    let app = TestApp::new();
    let id = app.sign_up("jane@example.com").await;
    let expired = app.expired_token(&id);

    let (status, body) = app
        .send(
            Request::post("/logout")
                .header(header::AUTHORIZATION, format!("Bearer {expired}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User successfully logged out.");
}

#[tokio::test]
async fn test_expired_token_without_logout_intent_is_unauthorized() {
    let app = TestApp::new();
    let id = app.sign_up("jane@example.com").await;
    let expired = app.expired_token(&id);

    let (status, body) = app.send(get(&format!("/me?token={expired}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token.");

    let (status, _) = app
        .send(get(&format!("/me?token={expired}&isLogout=false")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
