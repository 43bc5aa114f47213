//! Route definitions for the `/system` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::system;
use crate::state::AppState;

/// Routes mounted at `/system`. All require authentication.
///
/// ```text
/// GET  /cache           -> get_cache (in-memory snapshot)
/// POST /cache/refresh   -> refresh_cache (synchronous re-read from storage)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cache", get(system::get_cache))
        .route("/cache/refresh", post(system::refresh_cache))
}
