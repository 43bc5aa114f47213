//! Repository for the `user_sessions` table.

use sqlx::PgPool;
use userhub_core::types::DbId;

use crate::models::session::UserSession;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "session_id, user_id, token, session_time, is_expired";

/// Provides CRUD operations for user sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session for an issued token, returning the created row.
    ///
    /// The expiry window is fixed at one hour from insertion. No uniqueness
    /// constraint applies across a user's sessions; multiple live rows can
    /// coexist and the latest by `session_id` is the authoritative one.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        token: &str,
    ) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, token, session_time, is_expired)
             VALUES ($1, $2, NOW() + INTERVAL '1 hour', FALSE)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .bind(token)
            .fetch_one(pool)
            .await
    }

    /// Find the most recent session for a user, or `None` if the user has
    /// never logged in.
    pub async fn latest_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE user_id = $1
             ORDER BY session_id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the most recent session matching the exact `(user_id, token)`
    /// tuple.
    ///
    /// Matching on the tuple rather than the user's latest row guards against
    /// a structurally valid token whose session was superseded.
    pub async fn find_by_user_and_token(
        pool: &PgPool,
        user_id: &str,
        token: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE user_id = $1 AND token = $2
             ORDER BY session_id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Flag a session as expired. Idempotent: returns `true` if the row was
    /// flipped by this call, `false` if it was already expired or missing.
    pub async fn expire(pool: &PgPool, session_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_expired = TRUE
             WHERE session_id = $1 AND is_expired = FALSE",
        )
        .bind(session_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
