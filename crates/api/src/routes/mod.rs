pub mod auth;
pub mod health;
pub mod system;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
///
/// /users                       create (auth required)
/// /users/{user_id}             get, update, delete
/// /users/{user_id}/password    set new password
///
/// /system/cache                current parameter snapshot
/// /system/cache/refresh        manual cache refresh (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login).
        .nest("/auth", auth::router())
        // User management.
        .nest("/users", users::router())
        // System parameter cache inspection and manual refresh.
        .nest("/system", system::router())
}
