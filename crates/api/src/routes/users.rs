//! Route definitions for the `/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. All require authentication.
///
/// ```text
/// POST   /                      -> create_user
/// GET    /{user_id}             -> get_user
/// PUT    /{user_id}             -> update_user
/// DELETE /{user_id}             -> delete_user
/// PUT    /{user_id}/password    -> update_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create_user))
        .route(
            "/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/{user_id}/password", put(users::update_password))
}
