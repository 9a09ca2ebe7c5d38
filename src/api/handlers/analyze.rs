//! Handler for the message analysis endpoint.

use axum::{Json, extract::State};
use serde_json::json;
use validator::Validate;

use crate::api::dto::analyze::{AnalyzeRequest, AnalyzeResponse};
use crate::domain::entities::AnalysisRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Analyzes one message for language, links, phone numbers and public IPs.
///
/// # Endpoint
///
/// `POST /api/analyze`
///
/// # Request Body
///
/// ```json
/// {
///   "messageId": "m-1",
///   "content": "Bonjour, voir bit.ly/x ou appelez +33 1 23 45 67 89"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "messageId": "m-1",
///   "language": "fra",
///   "confidence": 87,
///   "cached": false,
///   "processingTimeMs": 143,
///   "urls": ["https://example.com/landing"],
///   "phones": ["+33123456789"],
///   "publicIps": [],
///   "shortenersUsed": ["bit.ly"],
///   "riskScore": 0,
///   "riskIndicators": []
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `content` is empty or too long. Analysis
/// itself always succeeds, degrading to partial results when the cache or
/// redirect targets are unreachable.
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    payload.validate()?;

    let length = payload.content.chars().count();
    if length > state.max_content_length {
        return Err(AppError::bad_request(
            "Content is too long",
            json!({ "max_length": state.max_content_length, "length": length }),
        ));
    }

    let request = AnalysisRequest::from(payload);
    let result = state.analysis_service.analyze(&request).await;

    Ok(Json(AnalyzeResponse::new(request, result)))
}
