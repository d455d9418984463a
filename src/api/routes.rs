//! API route configuration.

use crate::api::handlers::{
    alias_handler, delete_url_handler, health_handler, redirect_handler, save_url_handler,
};
use crate::state::{AliasState, AppState};
use axum::{
    Router,
    routing::{get, post},
};

/// Routes of the shortener service.
///
/// # Endpoints
///
/// - `POST   /url`       - Save a URL, optionally under a chosen alias
/// - `GET    /health`    - Health check: store, cache, analytics queue
/// - `GET    /{alias}`   - Redirect to the target URL
/// - `DELETE /{alias}`   - Delete an alias
pub fn shortener_routes() -> Router<AppState> {
    Router::new()
        .route("/url", post(save_url_handler))
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler).delete(delete_url_handler))
}

/// Routes of the `alias-gen` service.
///
/// - `GET /alias` - Next counter-based alias
pub fn alias_routes() -> Router<AliasState> {
    Router::new().route("/alias", get(alias_handler))
}
