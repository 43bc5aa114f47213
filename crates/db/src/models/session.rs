//! User session model.

use sqlx::FromRow;
use userhub_core::types::{DbId, Timestamp, UserId};

/// A session row from the `user_sessions` table.
///
/// One row per issued token. `session_time` is the absolute expiry instant;
/// `is_expired` is sticky once set. The latest row by `session_id` for a user
/// is the authoritative one.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub session_id: DbId,
    pub user_id: UserId,
    /// The exact token string as issued to the client.
    pub token: String,
    pub session_time: Timestamp,
    pub is_expired: bool,
}
