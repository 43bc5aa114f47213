//! User audit history model.
//!
//! Rows are append-only snapshots of a user record taken immediately before a
//! mutation; they are never updated or deleted, and the application never
//! reads them back outside of tests.

use chrono::NaiveDate;
use sqlx::FromRow;
use userhub_core::types::{DbId, Timestamp, UserId};

/// Action code recorded for profile and password updates.
pub const ACTION_UPDATE: &str = "U";
/// Action code recorded for deletes.
pub const ACTION_DELETE: &str = "D";

/// An audit row from the `users_history` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserHistory {
    pub history_id: DbId,
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
    pub action: String,
    pub recorded_at: Timestamp,
}
