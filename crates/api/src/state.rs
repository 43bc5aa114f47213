use std::sync::Arc;

use crate::config::ServerConfig;
use crate::system::SystemCache;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: userhub_db::DbPool,
    /// Server configuration (bind address, timeouts, JWT settings).
    pub config: Arc<ServerConfig>,
    /// In-memory mirror of the system parameters table.
    pub system: Arc<SystemCache>,
}
