//! HTTP-level integration tests for the login flow and the authentication
//! gate: token issuance, the rejection ladder, and lazy session expiry.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, TEST_PASSWORD};
use sqlx::PgPool;
use userhub_api::auth::jwt::{generate_token, JwtConfig};

// ---------------------------------------------------------------------------
// Login flow
// ---------------------------------------------------------------------------

/// Successful login returns a token whose session row holds the exact token
/// string with a one-hour window.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    common::create_test_user(&pool, "u1").await;
    let app = common::build_test_app(pool.clone()).await;

    let body = serde_json::json!({ "user_id": "u1", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Login successful");
    let token = json["token"].as_str().expect("token must be a string");

    let (db_token, is_expired): (String, bool) =
        sqlx::query_as("SELECT token, is_expired FROM user_sessions WHERE user_id = 'u1'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(db_token, token, "session row stores the issued token verbatim");
    assert!(!is_expired);
}

/// Login with a wrong password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    common::create_test_user(&pool, "u1").await;
    let app = common::build_test_app(pool).await;

    let body = serde_json::json!({ "user_id": "u1", "password": "incorrect" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with an unknown user id returns 401 (indistinguishable from a wrong
/// password).
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_user(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let body = serde_json::json!({ "user_id": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A blocked user is rejected with 403 before password verification matters.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_blocked_user(pool: PgPool) {
    common::create_test_user(&pool, "u1").await;
    sqlx::query("UPDATE users SET is_allowed = FALSE WHERE user_id = 'u1'")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({ "user_id": "u1", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A user stored with a plaintext password (hashing switched off at creation
/// time) still logs in; detection goes by stored format.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_plaintext_password(pool: PgPool) {
    common::create_test_user(&pool, "u1").await;
    sqlx::query("UPDATE users SET password = 'legacy-plain' WHERE user_id = 'u1'")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({ "user_id": "u1", "password": "legacy-plain" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A second login while the first session is still live reuses that session
/// instead of minting a new token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_already_logged_in(pool: PgPool) {
    common::create_test_user(&pool, "u1").await;
    let app = common::build_test_app(pool.clone()).await;

    let first = common::login(app.clone(), "u1", TEST_PASSWORD).await;

    let body = serde_json::json!({ "user_id": "u1", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User already logged in");
    assert_eq!(json["token"], first, "the live session's token is returned");

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1, "no second session row is created");
}

// ---------------------------------------------------------------------------
// The gate's rejection ladder
// ---------------------------------------------------------------------------

/// An issued token authenticates immediately: issue followed by authenticate
/// yields the issuing identity.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_issue_then_authenticate(pool: PgPool) {
    common::create_test_user(&pool, "u1").await;
    let app = common::build_test_app(pool).await;

    let token = common::login(app.clone(), "u1", TEST_PASSWORD).await;

    let response = get_auth(app, "/api/v1/users/u1", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user_id"], "u1");
}

/// No Authorization header at all is MissingToken, regardless of storage
/// state.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_token(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = common::get(app, "/api/v1/users/u1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_TOKEN");
    assert_eq!(json["error"], "Access Denied: Missing Token");
}

/// A bearer header with an empty token is also MissingToken.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = get_auth(app, "/api/v1/users/u1", "").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_TOKEN");
}

/// A syntactically malformed token fails structural validation with 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = get_auth(app, "/api/v1/users/u1", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TOKEN");
    assert_eq!(json["error"], "Access Denied: Invalid Token");
}

/// A token signed with a different secret is rejected as invalid.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_signed_with_other_secret(pool: PgPool) {
    common::create_test_user(&pool, "u1").await;
    let app = common::build_test_app(pool).await;

    let other = JwtConfig {
        secret: "a-completely-different-secret".to_string(),
        token_expiry_mins: 60,
    };
    let forged = generate_token("u1", "admin", &other).unwrap();

    let response = get_auth(app, "/api/v1/users/u1", &forged).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TOKEN");
}

/// A session past its window is flagged on first presentation
/// (SessionTimeout) and rejected as SessionExpired from then on.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_session_timeout_then_expired(pool: PgPool) {
    common::create_test_user(&pool, "u1").await;
    let app = common::build_test_app(pool.clone()).await;

    let token = common::login(app.clone(), "u1", TEST_PASSWORD).await;

    // Age the session past its one-hour window.
    sqlx::query("UPDATE user_sessions SET session_time = NOW() - INTERVAL '30 minutes'")
        .execute(&pool)
        .await
        .unwrap();

    // First presentation: timeout, and the row gets flagged.
    let response = get_auth(app.clone(), "/api/v1/users/u1", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SESSION_TIMEOUT");

    let (is_expired,): (bool,) =
        sqlx::query_as("SELECT is_expired FROM user_sessions WHERE user_id = 'u1'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(is_expired, "timeout must flag the row before responding");

    // Second presentation against the now-flagged row: expired.
    let response = get_auth(app, "/api/v1/users/u1", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SESSION_EXPIRED");
}

/// A structurally valid token with no matching session row proceeds with the
/// decoded identity.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_valid_token_without_session_row(pool: PgPool) {
    common::create_test_user(&pool, "u1").await;
    let app = common::build_test_app(pool.clone()).await;

    let token = common::login(app.clone(), "u1", TEST_PASSWORD).await;

    sqlx::query("DELETE FROM user_sessions")
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(app, "/api/v1/users/u1", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A storage failure during the session lookup is an internal error, never a
/// credential rejection.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_storage_failure_is_internal_error(pool: PgPool) {
    common::create_test_user(&pool, "u1").await;
    let app = common::build_test_app(pool.clone()).await;

    let token = common::login(app.clone(), "u1", TEST_PASSWORD).await;

    sqlx::query("DROP TABLE user_sessions")
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(app, "/api/v1/users/u1", &token).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
}
