//! Handlers for liveness and readiness endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthResponse, ReadinessChecks, ReadinessResponse};
use crate::state::AppState;

/// Reports that the process is up.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always **200 OK**; dependencies are not consulted.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Reports whether dependencies are reachable.
///
/// # Endpoint
///
/// `GET /ready`
///
/// # Response Codes
///
/// - **200 OK**: Cache healthy or disabled
/// - **503 Service Unavailable**: Cache configured but unreachable
///
/// Analysis keeps working while degraded, without caching.
///
/// # Response
///
/// ```json
/// {
///   "status": "ready",
///   "version": "0.1.0",
///   "checks": {
///     "cache": { "status": "ok", "message": "redis connected" }
///   }
/// }
/// ```
pub async fn readiness_handler(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let cache_check = check_cache(&state).await;
    let ready = cache_check.status != "error";

    let response = ReadinessResponse {
        status: if ready { "ready" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: ReadinessChecks { cache: cache_check },
    };

    if ready {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks cache connectivity via PING command.
async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();
    if backend == "disabled" {
        return CheckStatus {
            status: "disabled".to_string(),
            message: Some("Caching is not configured".to_string()),
        };
    }

    if state.cache.is_healthy().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{backend} connected")),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!("{backend} unreachable")),
        }
    }
}
