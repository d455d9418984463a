//! Top-level router configuration.
//!
//! # Route Structure
//!
//! Shortener service ([`app_router`]):
//!
//! - `POST   /url`       - Save a URL
//! - `GET    /health`    - Health check: store, cache, analytics queue
//! - `GET    /{alias}`   - Redirect
//! - `DELETE /{alias}`   - Delete
//!
//! Alias generator service ([`alias_router`]):
//!
//! - `GET    /alias`     - Next counter-based alias
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::{AliasState, AppState};
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the shortener router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = api::routes::shortener_routes()
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Constructs the `alias-gen` router.
pub fn alias_router(state: AliasState) -> NormalizePath<Router> {
    let router = api::routes::alias_routes()
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
