//! The request-time authentication decision.
//!
//! A bearer token passes through an ordered sequence of checks, terminal on
//! the first match: presence, signature/structure, then the state of the
//! session row recorded when the token was issued. A token can be
//! structurally valid yet dead at the session level, so both layers are
//! consulted on every request.

use chrono::Utc;
use sqlx::PgPool;
use userhub_core::types::UserId;
use userhub_db::repositories::SessionRepo;

use crate::auth::jwt::{validate_token, JwtConfig};

/// Authenticated identity attached to a request after the gate passes.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role_id: String,
}

/// Why a request was not authenticated.
///
/// The four credential variants are user-facing and recoverable by logging in
/// again; `Storage` is an infrastructure failure and must never be presented
/// as a credential problem.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Access Denied: Missing Token")]
    MissingToken,

    #[error("Access Denied: Invalid Token")]
    InvalidToken,

    #[error("Session Timeout: Please login again")]
    SessionTimeout,

    #[error("Session Expired: Please login again")]
    SessionExpired,

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Evaluate a bearer token and return the authenticated identity or the first
/// matching rejection.
///
/// Ordering:
/// 1. no token presented -> [`AuthError::MissingToken`]
/// 2. signature/structure invalid -> [`AuthError::InvalidToken`]
/// 3. session lookup by exact `(user_id, token)` tuple; no matching row means
///    the decoded identity stands on its own
/// 4. session past its window and not yet flagged -> flag it, then
///    [`AuthError::SessionTimeout`]
/// 5. session already flagged -> [`AuthError::SessionExpired`]
///
/// The expire write in step 4 completes before the rejection is returned, so
/// a subsequent request observes the row already flagged. Two concurrent
/// requests may race on that write; `expire` is idempotent so both settle on
/// the same state.
pub async fn authenticate(
    pool: &PgPool,
    config: &JwtConfig,
    bearer: Option<&str>,
) -> Result<AuthUser, AuthError> {
    let token = match bearer {
        Some(token) if !token.is_empty() => token,
        _ => return Err(AuthError::MissingToken),
    };

    let claims = validate_token(token, config).map_err(|e| {
        tracing::debug!(error = %e, "Token failed structural validation");
        AuthError::InvalidToken
    })?;

    let session = SessionRepo::find_by_user_and_token(pool, &claims.sub, token).await?;

    if let Some(session) = session {
        if session.session_time < Utc::now() && !session.is_expired {
            SessionRepo::expire(pool, session.session_id).await?;
            tracing::debug!(
                user_id = %claims.sub,
                session_id = session.session_id,
                "Session timed out, flagged expired"
            );
            return Err(AuthError::SessionTimeout);
        }
        if session.is_expired {
            tracing::debug!(
                user_id = %claims.sub,
                session_id = session.session_id,
                "Session already expired"
            );
            return Err(AuthError::SessionExpired);
        }
    }

    Ok(AuthUser {
        user_id: claims.sub,
        role_id: claims.role_id,
    })
}
