//! Handler for alias redirects.

use axum::{
    extract::{Path, State},
    http::{Extensions, HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::client_info_from_parts;

/// Redirects an alias to its target URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Request Flow
///
/// 1. Look the alias up in the cache
/// 2. On a miss or cache error, read the store and warm the cache
/// 3. Queue a resolution event for analytics, carrying the client's user
///    agent, IP and referrer (dropped if the queue is full)
/// 4. Return 302 Found
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist or was deleted.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
) -> Result<Response, AppError> {
    let client = client_info_from_parts(&headers, &extensions);

    let target = state
        .service
        .resolve_with_client(state.deadline(), &alias, client)
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]).into_response())
}
