//! Process-wide cache of operator-tunable system parameters.
//!
//! The cache mirrors the `system_parameters` table. Readers take a cheap
//! in-memory snapshot and never touch storage; refreshes install a complete
//! new snapshot in one write, so a concurrent reader observes either the old
//! or the new state, never a half-applied mix. A failed refresh leaves the
//! previous snapshot fully intact.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use sqlx::PgPool;
use userhub_core::params::SystemFlags;
use userhub_core::types::Timestamp;
use userhub_db::repositories::SystemParamRepo;

#[derive(Debug, Default)]
struct CacheState {
    flags: SystemFlags,
    last_updated: Option<Timestamp>,
}

/// Shared, refreshable mirror of the system parameters.
///
/// Starts out with [`SystemFlags::default`]; call [`SystemCache::refresh`]
/// once at startup to load the stored values.
#[derive(Debug, Default)]
pub struct SystemCache {
    inner: RwLock<CacheState>,
}

impl SystemCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current flag snapshot. Never blocks on storage.
    pub fn snapshot(&self) -> SystemFlags {
        self.read().flags.clone()
    }

    /// When the cache last completed a successful refresh, if ever.
    pub fn last_updated(&self) -> Option<Timestamp> {
        self.read().last_updated
    }

    /// Re-read all recognized parameters from storage and install the result
    /// as the new snapshot.
    ///
    /// Rows with unparseable values are logged and skipped, leaving that
    /// field at its previous value. On a storage error the in-memory state is
    /// untouched and the error propagates to the caller.
    pub async fn refresh(&self, pool: &PgPool) -> Result<SystemFlags, sqlx::Error> {
        let rows = SystemParamRepo::fetch_known(pool).await?;

        // Build the candidate snapshot off to the side; the shared state is
        // only touched once the whole set has been applied.
        let mut next = self.snapshot();
        for row in &rows {
            if let Err(e) = next.apply(&row.param_id, &row.param_value) {
                tracing::warn!(error = %e, "Skipping system parameter row");
            }
        }

        let now = Utc::now();
        {
            let mut guard = self.write();
            guard.flags = next.clone();
            guard.last_updated = Some(now);
        }

        tracing::info!(
            password_hashing_required = next.password_hashing_required,
            send_password_in_resp = next.send_password_in_resp,
            create_user_history = next.create_user_history,
            auto_cache_refresh_required = next.auto_cache_refresh_required,
            auto_cache_refresh_interval_ms = next.auto_cache_refresh_interval_ms,
            "System cache refreshed"
        );

        Ok(next)
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
