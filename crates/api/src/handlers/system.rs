//! Handlers for the `/system` resource (parameter cache inspection and
//! manual refresh).

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use userhub_core::params::SystemFlags;
use userhub_core::types::Timestamp;

use crate::auth::gate::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

/// Cache snapshot returned by both system endpoints.
#[derive(Debug, Serialize)]
pub struct CacheResponse {
    pub flags: SystemFlags,
    /// Completion time of the most recent successful refresh.
    pub last_updated: Option<Timestamp>,
}

/// GET /api/v1/system/cache
///
/// The current in-memory snapshot; never touches storage.
pub async fn get_cache(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Json<CacheResponse> {
    Json(CacheResponse {
        flags: state.system.snapshot(),
        last_updated: state.system.last_updated(),
    })
}

/// POST /api/v1/system/cache/refresh
///
/// Synchronously re-read the parameters from storage and report the new
/// snapshot. A storage failure surfaces as a 500 and leaves the previous
/// snapshot in place.
pub async fn refresh_cache(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<CacheResponse>> {
    let flags = state.system.refresh(&state.pool).await?;

    Ok(Json(CacheResponse {
        flags,
        last_updated: state.system.last_updated(),
    }))
}
