//! Periodic refresh of the system parameter cache.
//!
//! Re-reads the `system_parameters` table on an interval that is itself a
//! system parameter, so operators can retune the cadence (or switch the loop
//! off) without a restart. Runs until cancelled.

use std::sync::Arc;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::system::SystemCache;

/// Run the automatic cache refresh loop.
///
/// The sleep duration and the enabled flag are re-read from the latest
/// snapshot every cycle, so a changed `AutoCacheRefreshInterval` or
/// `AutoCacheRefreshRequired` takes effect one cycle later. While disabled,
/// the loop keeps ticking without touching storage; a manual refresh that
/// re-enables the flag brings it back. Runs until `cancel` is triggered.
pub async fn run(pool: PgPool, cache: Arc<SystemCache>, cancel: CancellationToken) {
    let flags = cache.snapshot();
    tracing::info!(
        interval_ms = flags.auto_cache_refresh_interval_ms,
        enabled = flags.auto_cache_refresh_required,
        "System cache refresh job started"
    );

    loop {
        let interval = cache.snapshot().refresh_interval();

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("System cache refresh job stopping");
                break;
            }
            _ = tokio::time::sleep(interval) => {
                if !cache.snapshot().auto_cache_refresh_required {
                    tracing::debug!("Automatic cache refresh disabled, skipping cycle");
                    continue;
                }
                if let Err(e) = cache.refresh(&pool).await {
                    // Previous snapshot stays in place; try again next cycle.
                    tracing::error!(error = %e, "System cache refresh failed");
                }
            }
        }
    }
}
