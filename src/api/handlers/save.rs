//! Handler for the save endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::save_url::{SaveUrlRequest, SaveUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Saves a URL and returns its alias.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "alias": "promo"   // optional, generated when absent or empty
/// }
/// ```
///
/// The URL is stored in its normalized form (see
/// [`SaveUrlRequest::normalized_url`]).
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "alias": "promo" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is malformed or fails validation
/// - 409 Conflict if the alias is taken
/// - 500 Internal Server Error if generation or storage fails
pub async fn save_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveUrlResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let target = payload
        .normalized_url()
        .ok_or_else(|| AppError::bad_request("Invalid URL format", json!({})))?;

    let alias = state
        .service
        .save(state.deadline(), &target, payload.requested_alias())
        .await?;

    Ok((StatusCode::CREATED, Json(SaveUrlResponse { alias })))
}
