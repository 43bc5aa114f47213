//! Repository for the `system_parameters` table.

use sqlx::PgPool;
use userhub_core::params::KNOWN_PARAMS;

use crate::models::system_param::SystemParam;

/// Provides read access to system parameters.
///
/// The table is a source of truth the application only mirrors; nothing here
/// writes back.
pub struct SystemParamRepo;

impl SystemParamRepo {
    /// Fetch all recognized parameter rows in one query.
    ///
    /// Rows for ids the cache does not recognize are excluded here; a row
    /// missing from the result simply leaves the previous value in place.
    pub async fn fetch_known(pool: &PgPool) -> Result<Vec<SystemParam>, sqlx::Error> {
        let ids: Vec<String> = KNOWN_PARAMS.iter().map(|id| id.to_string()).collect();
        sqlx::query_as::<_, SystemParam>(
            "SELECT param_id, param_value FROM system_parameters WHERE param_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await
    }
}
