//! User entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use userhub_core::types::UserId;

/// Full user row from the `users` table.
///
/// Contains the password column -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: UserId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// `"M"` or `"F"`, enforced by a check constraint.
    pub gender: String,
    pub dob: Option<NaiveDate>,
    pub country_code: Option<String>,
    pub state_code: Option<String>,
    pub city_name: Option<String>,
    pub role_id: String,
    /// Active/blocked flag; blocked users cannot log in.
    pub is_allowed: bool,
    /// Hashed or plaintext depending on the `PasswordHashingRequired` policy
    /// in effect when the password was set.
    pub password: String,
}

/// Safe user representation for API responses.
///
/// The password is present only when the `SendPasswordInResp` policy is set
/// (used to hand a generated one-time password back to the operator).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: UserId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: String,
    pub dob: Option<NaiveDate>,
    pub country_code: Option<String>,
    pub state_code: Option<String>,
    pub city_name: Option<String>,
    pub role_id: String,
    pub is_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserResponse {
    /// Build a response from a row, including the password column only when
    /// `include_password` is set.
    pub fn from_user(user: User, include_password: bool) -> Self {
        let password = include_password.then_some(user.password);
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            middle_name: user.middle_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            gender: user.gender,
            dob: user.dob,
            country_code: user.country_code,
            state_code: user.state_code,
            city_name: user.city_name,
            role_id: user.role_id,
            is_allowed: user.is_allowed,
            password,
        }
    }
}

/// DTO for inserting a new user. The password arrives already hashed (or not,
/// per policy) from the handler layer.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub user_id: UserId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: String,
    pub dob: Option<NaiveDate>,
    pub country_code: Option<String>,
    pub state_code: Option<String>,
    pub city_name: Option<String>,
    pub role_id: String,
    pub is_allowed: bool,
    pub password: String,
}

/// DTO for updating an existing user. All fields are optional; `None` leaves
/// the stored value untouched. Password changes go through a dedicated path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub country_code: Option<String>,
    pub state_code: Option<String>,
    pub city_name: Option<String>,
    pub role_id: Option<String>,
    pub is_allowed: Option<bool>,
}
