//! Handlers for the `/users` resource.
//!
//! All handlers require authentication. Behavior is shaped by the system
//! parameter cache: `PasswordHashingRequired` decides how passwords are
//! stored, `SendPasswordInResp` whether responses carry the password column,
//! and `CreateUserHistory` whether mutations write an audit snapshot first.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use userhub_core::error::CoreError;
use userhub_db::models::user::{CreateUser, UpdateUser, UserResponse};
use userhub_db::models::user_history::{ACTION_DELETE, ACTION_UPDATE};
use userhub_db::repositories::{UserHistoryRepo, UserRepo};
use validator::Validate;

use crate::auth::gate::AuthUser;
use crate::auth::password::{generate_one_time_password, hash_password, ONE_TIME_PASSWORD_LEN};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
///
/// No password field: the server generates a one-time password and returns it
/// in the response only when `SendPasswordInResp` allows.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    /// `"M"` or `"F"`; anything else is rejected by the check constraint.
    #[validate(length(equal = 1))]
    pub gender: String,
    pub dob: Option<NaiveDate>,
    #[validate(length(max = 3))]
    pub country_code: Option<String>,
    #[validate(length(max = 3))]
    pub state_code: Option<String>,
    pub city_name: Option<String>,
    #[validate(length(min = 1))]
    pub role_id: String,
    /// Defaults to `true` (allowed) when omitted.
    pub is_allowed: Option<bool>,
}

/// Request body for `PUT /users/{user_id}`. All fields optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(equal = 1))]
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    #[validate(length(max = 3))]
    pub country_code: Option<String>,
    #[validate(length(max = 3))]
    pub state_code: Option<String>,
    pub city_name: Option<String>,
    #[validate(length(min = 1))]
    pub role_id: Option<String>,
    pub is_allowed: Option<bool>,
}

/// Request body for `PUT /users/{user_id}/password`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1))]
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Create a new user with a generated one-time password. Returns 201 with
/// the created row; the password column is included only when
/// `SendPasswordInResp` is set.
pub async fn create_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;

    let flags = state.system.snapshot();

    let one_time = generate_one_time_password(ONE_TIME_PASSWORD_LEN);
    tracing::info!(
        hashing = flags.password_hashing_required,
        "Creating user with generated one-time password"
    );

    let password = if flags.password_hashing_required {
        hash_password(&one_time)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?
    } else {
        one_time
    };

    let dto = CreateUser {
        user_id: input.user_id,
        first_name: input.first_name,
        middle_name: input.middle_name,
        last_name: input.last_name,
        email: input.email,
        phone: input.phone,
        gender: input.gender,
        dob: input.dob,
        country_code: input.country_code,
        state_code: input.state_code,
        city_name: input.city_name,
        role_id: input.role_id,
        is_allowed: input.is_allowed.unwrap_or(true),
        password,
    };

    let user = UserRepo::create(&state.pool, &dto).await?;
    let response = UserResponse::from_user(user, flags.send_password_in_resp);

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, &user_id)
        .await?
        .ok_or_else(|| not_found(&user_id))?;

    let flags = state.system.snapshot();
    Ok(Json(UserResponse::from_user(user, flags.send_password_in_resp)))
}

/// PUT /api/v1/users/{user_id}
///
/// Partial update: only provided fields change. When `CreateUserHistory` is
/// set, an audit snapshot with action `"U"` is written before the update
/// takes effect.
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;

    let flags = state.system.snapshot();
    if flags.create_user_history {
        UserHistoryRepo::record(&state.pool, ACTION_UPDATE, &user_id).await?;
    }

    let dto = UpdateUser {
        first_name: input.first_name,
        middle_name: input.middle_name,
        last_name: input.last_name,
        email: input.email,
        phone: input.phone,
        gender: input.gender,
        dob: input.dob,
        country_code: input.country_code,
        state_code: input.state_code,
        city_name: input.city_name,
        role_id: input.role_id,
        is_allowed: input.is_allowed,
    };

    let user = UserRepo::update(&state.pool, &user_id, &dto)
        .await?
        .ok_or_else(|| not_found(&user_id))?;

    Ok(Json(UserResponse::from_user(user, flags.send_password_in_resp)))
}

/// PUT /api/v1/users/{user_id}/password
///
/// Replace the stored password, hashing per policy. Returns 204 No Content.
pub async fn update_password(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
    Json(input): Json<UpdatePasswordRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;

    let flags = state.system.snapshot();
    tracing::info!(
        hashing = flags.password_hashing_required,
        "Updating password"
    );

    let password = if flags.password_hashing_required {
        hash_password(&input.new_password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?
    } else {
        input.new_password
    };

    if flags.create_user_history {
        UserHistoryRepo::record(&state.pool, ACTION_UPDATE, &user_id).await?;
    }

    let updated = UserRepo::update_password(&state.pool, &user_id, &password).await?;
    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&user_id))
    }
}

/// DELETE /api/v1/users/{user_id}
///
/// Hard delete. When `CreateUserHistory` is set, an audit snapshot with
/// action `"D"` is written first. Returns 204 No Content.
pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> AppResult<StatusCode> {
    let flags = state.system.snapshot();
    if flags.create_user_history {
        UserHistoryRepo::record(&state.pool, ACTION_DELETE, &user_id).await?;
    }

    let deleted = UserRepo::delete(&state.pool, &user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&user_id))
    }
}

fn not_found(user_id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "User",
        id: user_id.to_string(),
    })
}
