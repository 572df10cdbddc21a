use axum::{
    Router,
    body::Body,
    extract::FromRequestParts,
    http::{Method, Request, StatusCode, Uri, header, request::Parts},
};
use course_portal::{
    AppState,
    auth::{self, AuthUser, Claims},
    config::{AppConfig, Env},
    create_router,
    models::{AuthResponse, NewUser, User},
    repository::{MemoryRepository, Repository, RepositoryState},
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";

/// Signs a token expiring `exp_offset` seconds from now (negative = already expired).
fn create_token(user_id: Uuid, exp_offset: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };
    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn test_state(env: Env, repo: Arc<MemoryRepository>) -> AppState {
    let mut config = AppConfig::default();
    config.env = env;
    config.jwt_secret = TEST_JWT_SECRET.to_string();
    AppState {
        repo: repo as RepositoryState,
        config,
    }
}

async fn seed_user(repo: &MemoryRepository, email: &str, is_admin: bool) -> User {
    repo.create_user(NewUser {
        email: email.to_string(),
        password_hash: "$argon2id$test-hash".to_string(),
        first_name: "Auth".to_string(),
        last_name: "Tester".to_string(),
        is_admin,
    })
    .await
    .expect("failed to seed user")
}

/// Helper to get the mutable Parts struct from a generated Request.
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&json).unwrap()))
        .unwrap()
}

// --- Extractor Tests ---

#[tokio::test]
async fn test_auth_success_with_valid_jwt() {
    let repo = Arc::new(MemoryRepository::new());
    let user = seed_user(&repo, "jwt@test.com", false).await;
    let state = test_state(Env::Production, repo);

    let token = create_token(user.id, 3600);
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;
    assert!(auth_user.is_ok());
    let resolved = auth_user.unwrap();
    assert_eq!(resolved.id, user.id);
    assert!(!resolved.is_admin);
}

#[tokio::test]
async fn test_auth_failure_with_missing_header() {
    let state = test_state(Env::Production, Arc::new(MemoryRepository::new()));
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;
    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_expired_jwt() {
    let repo = Arc::new(MemoryRepository::new());
    let user = seed_user(&repo, "expired@test.com", false).await;
    let state = test_state(Env::Production, repo);

    // Expired an hour ago, comfortably past the validator's leeway window.
    let token = create_token(user.id, -3600);
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;
    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_for_deleted_user() {
    let repo = Arc::new(MemoryRepository::new());
    let user = seed_user(&repo, "ghost@test.com", false).await;
    let token = create_token(user.id, 3600);

    repo.delete_user(user.id).await;
    let state = test_state(Env::Production, repo);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    // The token is cryptographically valid, but the subject no longer exists.
    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;
    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_local_bypass_success() {
    let repo = Arc::new(MemoryRepository::new());
    let user = seed_user(&repo, "local@dev.com", true).await;
    let state = test_state(Env::Local, repo);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::HeaderName::from_static("x-user-id"),
        header::HeaderValue::from_str(&user.id.to_string()).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;
    assert!(auth_user.is_ok());
    let resolved = auth_user.unwrap();
    assert_eq!(resolved.id, user.id);
    assert!(resolved.is_admin);
}

#[tokio::test]
async fn test_local_bypass_disabled_in_prod() {
    let repo = Arc::new(MemoryRepository::new());
    let user = seed_user(&repo, "prod@test.com", false).await;
    let state = test_state(Env::Production, repo);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    // Provide ONLY the local bypass header.
    parts.headers.insert(
        header::HeaderName::from_static("x-user-id"),
        header::HeaderValue::from_str(&user.id.to_string()).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;
    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

// --- Password Hashing ---

#[test]
fn test_password_hash_roundtrip() {
    let hash = auth::hash_password("correct horse battery staple").unwrap();
    assert_ne!(hash, "correct horse battery staple");
    assert!(hash.starts_with("$argon2"));

    assert!(auth::verify_password("correct horse battery staple", &hash));
    assert!(!auth::verify_password("wrong password", &hash));
    // Garbage stored hashes fail closed.
    assert!(!auth::verify_password("anything", "not-a-phc-string"));
}

// --- End-to-End Identity Flows (Production env: tokens only, no bypass) ---

fn production_app() -> (Router, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::new());
    let state = test_state(Env::Production, repo.clone());
    (create_router(state), repo)
}

#[tokio::test]
async fn test_register_login_and_use_token() {
    let (app, _repo) = production_app();

    // Register.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "email": "flow@test.com", "password": "flow-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let registered: AuthResponse = body_json(response).await;
    assert!(!registered.token.is_empty());

    // Duplicate registration refused.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "email": "flow@test.com", "password": "other-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Login with the right password.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "email": "flow@test.com", "password": "flow-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let logged_in: AuthResponse = body_json(response).await;

    // The token authenticates a protected route.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/me")
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", logged_in.token),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me: User = body_json(response).await;
    assert_eq!(me.email, "flow@test.com");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let (app, _repo) = production_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "email": "victim@test.com", "password": "real-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Wrong password and unknown email look identical to the caller.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "email": "victim@test.com", "password": "guess" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "email": "nobody@test.com", "password": "guess" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validates_input() {
    let (app, _repo) = production_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "email": "not-an-email", "password": "long-enough" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "email": "ok@test.com", "password": "tiny" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
