//! System parameter model.

use sqlx::FromRow;

/// A `(param_id, param_value)` row from the `system_parameters` table.
///
/// Values are stored as text; parsing into typed flags happens in
/// `userhub_core::params`.
#[derive(Debug, Clone, FromRow)]
pub struct SystemParam {
    pub param_id: String,
    pub param_value: String,
}
