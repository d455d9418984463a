//! Handler for alias deletion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::AppError;
use crate::state::AppState;

/// Deletes an alias.
///
/// # Endpoint
///
/// `DELETE /{alias}`
///
/// # Errors
///
/// Returns 404 Not Found if there was nothing to delete.
pub async fn delete_url_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.service.delete(state.deadline(), &alias).await?;

    Ok(StatusCode::NO_CONTENT)
}
