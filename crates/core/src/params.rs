//! Typed mirror of the `system_parameters` table.
//!
//! Operator-tunable behavior flags live in storage as `(param_id, param_value)`
//! text pairs. This module defines the recognized ids, the parsed
//! [`SystemFlags`] snapshot, and the parsing conventions: booleans are the
//! single character `"Y"` (anything else is false), the refresh interval is an
//! integer number of milliseconds.

use std::time::Duration;

use serde::Serialize;

/// Whether passwords are hashed before storage.
pub const PARAM_PASSWORD_HASHING_REQUIRED: &str = "PasswordHashingRequired";
/// Whether user API responses include the password field.
pub const PARAM_SEND_PASSWORD_IN_RESP: &str = "SendPasswordInResp";
/// Whether user mutations write an audit snapshot first.
pub const PARAM_CREATE_USER_HISTORY: &str = "CreateUserHistory";
/// Whether the background cache refresher is active.
pub const PARAM_AUTO_CACHE_REFRESH_REQUIRED: &str = "AutoCacheRefreshRequired";
/// Refresh interval in milliseconds.
pub const PARAM_AUTO_CACHE_REFRESH_INTERVAL: &str = "AutoCacheRefreshInterval";

/// Every parameter id the cache recognizes; the refresh query selects exactly
/// these rows.
pub const KNOWN_PARAMS: [&str; 5] = [
    PARAM_PASSWORD_HASHING_REQUIRED,
    PARAM_SEND_PASSWORD_IN_RESP,
    PARAM_CREATE_USER_HISTORY,
    PARAM_AUTO_CACHE_REFRESH_REQUIRED,
    PARAM_AUTO_CACHE_REFRESH_INTERVAL,
];

/// Default refresh interval: 10 minutes.
const DEFAULT_REFRESH_INTERVAL_MS: u64 = 600_000;

/// One complete snapshot of the resolved system parameters.
///
/// Instances are immutable from the reader's perspective: the cache installs a
/// whole new snapshot after each refresh rather than mutating fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemFlags {
    pub password_hashing_required: bool,
    pub send_password_in_resp: bool,
    pub create_user_history: bool,
    pub auto_cache_refresh_required: bool,
    /// Milliseconds between automatic refreshes (see [`SystemFlags::refresh_interval`]).
    pub auto_cache_refresh_interval_ms: u64,
}

impl Default for SystemFlags {
    fn default() -> Self {
        Self {
            password_hashing_required: false,
            send_password_in_resp: false,
            create_user_history: false,
            auto_cache_refresh_required: true,
            auto_cache_refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

/// A parameter row that could not be applied to the snapshot.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("unrecognized parameter id: {0}")]
    Unknown(String),

    #[error("invalid value {value:?} for parameter {id}")]
    Invalid { id: &'static str, value: String },
}

impl SystemFlags {
    /// Apply a single `(param_id, param_value)` row to this snapshot.
    ///
    /// Unknown ids and unparseable values leave the snapshot untouched and
    /// return an error for the caller to log.
    pub fn apply(&mut self, param_id: &str, param_value: &str) -> Result<(), ParamError> {
        match param_id {
            PARAM_PASSWORD_HASHING_REQUIRED => {
                self.password_hashing_required = yes(param_value);
            }
            PARAM_SEND_PASSWORD_IN_RESP => {
                self.send_password_in_resp = yes(param_value);
            }
            PARAM_CREATE_USER_HISTORY => {
                self.create_user_history = yes(param_value);
            }
            PARAM_AUTO_CACHE_REFRESH_REQUIRED => {
                self.auto_cache_refresh_required = yes(param_value);
            }
            PARAM_AUTO_CACHE_REFRESH_INTERVAL => {
                self.auto_cache_refresh_interval_ms =
                    param_value.parse().map_err(|_| ParamError::Invalid {
                        id: PARAM_AUTO_CACHE_REFRESH_INTERVAL,
                        value: param_value.to_string(),
                    })?;
            }
            other => return Err(ParamError::Unknown(other.to_string())),
        }
        Ok(())
    }

    /// The automatic refresh interval as a [`Duration`].
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.auto_cache_refresh_interval_ms)
    }
}

/// The storage convention for booleans: `"Y"` is true, anything else is false.
fn yes(value: &str) -> bool {
    value == "Y"
}
