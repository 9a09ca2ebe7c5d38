//! DTOs for the analysis endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{AnalysisRequest, AnalysisResult};

/// Inbound message to analyze.
///
/// Correlation identifiers are optional and echoed back untouched.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub parent_id: Option<String>,
    pub customer_id: Option<String>,
    pub sender_id: Option<String>,
    pub message_id: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
}

impl From<AnalyzeRequest> for AnalysisRequest {
    fn from(request: AnalyzeRequest) -> Self {
        Self {
            parent_id: request.parent_id,
            customer_id: request.customer_id,
            sender_id: request.sender_id,
            message_id: request.message_id,
            content: request.content,
        }
    }
}

/// Analysis report returned to the caller.
///
/// `risk_score` and `risk_indicators` are reserved for downstream scoring
/// and are always `0` / empty here.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    pub language: String,
    pub confidence: u8,
    pub cached: bool,
    pub processing_time_ms: u64,
    pub urls: Vec<String>,
    pub phones: Vec<String>,
    pub public_ips: Vec<String>,
    pub shorteners_used: Vec<String>,
    pub risk_score: u32,
    pub risk_indicators: Vec<String>,
}

impl AnalyzeResponse {
    pub fn new(request: AnalysisRequest, result: AnalysisResult) -> Self {
        Self {
            parent_id: request.parent_id,
            customer_id: request.customer_id,
            sender_id: request.sender_id,
            message_id: request.message_id,
            language: result.language,
            confidence: result.confidence,
            cached: result.cached,
            processing_time_ms: result.processing_time_ms,
            urls: result.urls,
            phones: result.phones,
            public_ips: result.public_ips,
            shorteners_used: result.shorteners_used,
            risk_score: 0,
            risk_indicators: Vec::new(),
        }
    }
}
