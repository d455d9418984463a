//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: Backend ping
/// 2. **Cache**: Backend ping (always ok when caching is disabled)
/// 3. **Analytics Queue**: Checks if the channel is open and reports free slots
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;

    let cache_check = check_cache(&state).await;

    let queue_check = check_analytics_queue(&state);

    let all_healthy = store_check.is_ok() && cache_check.is_ok() && queue_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            cache: cache_check,
            analytics_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    match state
        .deadline()
        .run(state.service.store().health_check())
        .await
    {
        Ok(true) => CheckStatus::ok("Store reachable"),
        Ok(false) => CheckStatus::error("Store unreachable"),
        Err(_) => CheckStatus::error("Store health check timed out"),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    match state
        .deadline()
        .run(state.service.cache().health_check())
        .await
    {
        Ok(true) => CheckStatus::ok("Cache reachable"),
        Ok(false) => CheckStatus::error("Cache unreachable"),
        Err(_) => CheckStatus::error("Cache health check timed out"),
    }
}

fn check_analytics_queue(state: &AppState) -> CheckStatus {
    let analytics = state.service.analytics();
    if analytics.is_closed() {
        CheckStatus::error("Analytics queue is closed")
    } else {
        CheckStatus::ok(format!("Free slots: {}", analytics.capacity()))
    }
}
