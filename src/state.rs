use std::sync::Arc;

use crate::application::services::AnalysisService;
use crate::infrastructure::cache::CacheService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub analysis_service: Arc<AnalysisService>,
    pub cache: Arc<dyn CacheService>,
    /// Maximum accepted `content` length in characters.
    pub max_content_length: usize,
}

impl AppState {
    pub fn new(
        analysis_service: Arc<AnalysisService>,
        cache: Arc<dyn CacheService>,
        max_content_length: usize,
    ) -> Self {
        Self {
            analysis_service,
            cache,
            max_content_length,
        }
    }
}
