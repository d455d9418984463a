//! Handler for the `alias-gen` service.

use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

use crate::api::dto::alias::AliasResponse;
use crate::state::AliasState;
use crate::utils::alias_codec;

/// Issues the next counter-based alias.
///
/// # Endpoint
///
/// `GET /alias`
///
/// Every call increments the shared counter once, so concurrent callers
/// (including other `alias-gen` instances on the same database) never
/// receive the same alias.
pub async fn alias_handler(State(state): State<AliasState>) -> (StatusCode, Json<AliasResponse>) {
    match state.counter.increment().await {
        Ok(value) => (
            StatusCode::OK,
            Json(AliasResponse::ok(alias_codec::encode(value))),
        ),
        Err(e) => {
            error!("Failed to increment counter: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AliasResponse::error("failed to increment counter")),
            )
        }
    }
}
