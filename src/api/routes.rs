//! API route configuration.

use crate::api::handlers::analyze_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /analyze` - Analyze one message
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze_handler))
}
