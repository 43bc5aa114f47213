//! Repository for the `users_history` audit table.

use sqlx::PgPool;

use crate::models::user_history::UserHistory;

/// Column list for SELECT/RETURNING.
const COLUMNS: &str = "history_id, user_id, first_name, middle_name, last_name, email, \
                        phone, gender, dob, country_code, state_code, city_name, role_id, \
                        is_allowed, password, action, recorded_at";

/// Column subset snapshotted from `users`.
const SNAPSHOT_COLUMNS: &str = "user_id, first_name, middle_name, last_name, email, phone, \
                                 gender, dob, country_code, state_code, city_name, role_id, \
                                 is_allowed, password";

/// Appends audit snapshots of user rows. Rows are never updated or deleted.
pub struct UserHistoryRepo;

impl UserHistoryRepo {
    /// Snapshot the current state of a user into the history table with the
    /// given action code (`"U"` or `"D"`), immediately before the mutation.
    ///
    /// Returns `None` when the user does not exist (nothing to snapshot).
    pub async fn record(
        pool: &PgPool,
        action: &str,
        user_id: &str,
    ) -> Result<Option<UserHistory>, sqlx::Error> {
        let query = format!(
            "INSERT INTO users_history ({SNAPSHOT_COLUMNS}, action)
             SELECT {SNAPSHOT_COLUMNS}, $1 FROM users WHERE user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserHistory>(&query)
            .bind(action)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
