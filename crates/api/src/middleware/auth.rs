//! Authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::gate::{self, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Use [`AuthUser`] as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role_id = %user.role_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The full gate runs on every extraction: structural token validation plus
/// the session-row check, so an administratively expired session is rejected
/// even while its token is still cryptographically valid.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let user = gate::authenticate(&state.pool, &state.config.jwt, bearer).await?;
        Ok(user)
    }
}
