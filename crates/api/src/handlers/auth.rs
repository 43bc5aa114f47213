//! Handlers for the `/auth` resource (login / token issuance).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use userhub_core::error::CoreError;
use userhub_core::types::Timestamp;
use userhub_db::models::user::User;
use userhub_db::repositories::{SessionRepo, UserRepo};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{is_argon2_hash, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    /// Absolute expiry of the session backing the token.
    pub session_time: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with user id + password and return a signed token.
///
/// A user whose latest session is still live gets that session's token back
/// instead of a fresh one; older sessions are never proactively invalidated,
/// they each run out their own window.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    input.validate()?;

    // 1. Find the user. Unknown id and wrong password are indistinguishable
    //    to the caller.
    let user = UserRepo::find_by_id(&state.pool, &input.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    // 2. Blocked users cannot log in.
    if !user.is_allowed {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is blocked".into(),
        )));
    }

    // 3. Verify the password against whatever format is stored.
    if !check_password(&input.password, &user.password)? {
        tracing::debug!(user_id = %user.user_id, "Password mismatch on login");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    // 4. Reuse the latest session while it is still live.
    if let Some(session) = SessionRepo::latest_for_user(&state.pool, &user.user_id).await? {
        if !session.is_expired && session.session_time > Utc::now() {
            tracing::info!(user_id = %user.user_id, "User already logged in");
            return Ok(Json(LoginResponse {
                message: "User already logged in",
                token: session.token,
                session_time: session.session_time,
            }));
        }
    }

    // 5. Issue a fresh token and record its session row.
    let (token, session_time) = issue_token(&state, &user).await?;
    tracing::info!(user_id = %user.user_id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
        session_time,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign a token for the user and persist the session row pairing the exact
/// token string with the user id.
async fn issue_token(state: &AppState, user: &User) -> AppResult<(String, Timestamp)> {
    let token = generate_token(&user.user_id, &user.role_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let session = SessionRepo::create(&state.pool, &user.user_id, &token).await?;

    Ok((token, session.session_time))
}

/// Verify a candidate password against the stored value.
///
/// Stored Argon2id hashes verify through argon2; anything else is a legacy
/// plaintext value and compares directly. Detection goes by stored format
/// rather than the current `PasswordHashingRequired` flag, since the flag can
/// change between when a password was set and when it is checked.
fn check_password(candidate: &str, stored: &str) -> AppResult<bool> {
    if is_argon2_hash(stored) {
        verify_password(candidate, stored)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
    } else {
        Ok(stored == candidate)
    }
}
