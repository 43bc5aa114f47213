/// Surrogate primary keys (sessions, history rows) are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Users are keyed by an externally-assigned text id.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
