//! HTTP-level integration tests for registration, login, and profile.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns 201 with a token and the public user view.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_returns_created_with_token(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "fan@example.com",
        "password": "secret-password",
        "displayName": "Concert Fan",
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "User registered successfully");
    assert!(json["token"].is_string());
    assert!(json["user"]["_id"].is_string());
    assert_eq!(json["user"]["email"], "fan@example.com");
    assert_eq!(json["user"]["displayName"], "Concert Fan");
    // The password hash must never appear in a response.
    assert!(json["user"].get("passwordHash").is_none());
    assert!(json["user"].get("password_hash").is_none());
}

/// Registering the same email twice returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_email_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "dup@example.com",
        "password": "secret-password",
        "displayName": "First",
    });

    let first = post_json(app.clone(), "/api/auth/register", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/api/auth/register", body).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let json = body_json(second).await;
    assert_eq!(json["error"], "User already exists with this email");
}

/// A password shorter than six characters is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_short_password_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "shorty@example.com",
        "password": "12345",
        "displayName": "Shorty",
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("at least 6"),
        "error should mention the minimum length, got: {}",
        json["error"]
    );
}

/// An invalid email is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_invalid_email_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "not-an-email",
        "password": "secret-password",
        "displayName": "Bad Email",
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Login with correct credentials returns 200 and a usable token.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success_returns_token(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let (_token, user_id) = common::register_user(app.clone(), "login@example.com").await;

    let body = serde_json::json!({
        "email": "login@example.com",
        "password": "test-password-123",
    });
    let response = post_json(app.clone(), "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["user"]["_id"], user_id.as_str());

    // The login token works against a protected route.
    let token = json["token"].as_str().unwrap();
    let profile = get_auth(app, "/api/auth/profile", token).await;
    assert_eq!(profile.status(), StatusCode::OK);
}

/// A wrong password and an unknown email produce the same 400 response.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_invalid_credentials_return_same_error(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    common::register_user(app.clone(), "victim@example.com").await;

    let wrong_password = post_json(
        app.clone(),
        "/api/auth/login",
        serde_json::json!({ "email": "victim@example.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    let wrong_password_body = body_json(wrong_password).await;

    let unknown_email = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "email": "ghost@example.com", "password": "whatever" }),
    )
    .await;
    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
    let unknown_email_body = body_json(unknown_email).await;

    assert_eq!(wrong_password_body["error"], "Invalid email or password");
    assert_eq!(wrong_password_body, unknown_email_body);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The profile route returns the authenticated user.
#[sqlx::test(migrations = "../db/migrations")]
async fn profile_returns_current_user(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let (token, user_id) = common::register_user(app.clone(), "me@example.com").await;

    let response = get_auth(app, "/api/auth/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["_id"], user_id.as_str());
    assert_eq!(json["user"]["email"], "me@example.com");
}

/// Missing bearer token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn profile_without_token_returns_401(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/auth/profile").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage bearer token returns 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn profile_with_invalid_token_returns_403(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/auth/profile", "not-a-real-token").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
