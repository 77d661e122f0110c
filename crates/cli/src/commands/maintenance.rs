//! Maintenance commands.

use serde_json::json;

use slooze_admin::error::AppError;
use slooze_admin::state::AppState;

use super::{CliError, emit};

/// Overwrite users and products with the seed data.
pub async fn reset(state: &AppState) -> Result<(), CliError> {
    state.catalog().reset_all().await.map_err(AppError::from)?;
    tracing::warn!("catalog reset to seed data");
    emit(&json!({ "reset": true }))
}
