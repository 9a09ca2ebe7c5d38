#![allow(dead_code)]

use async_trait::async_trait;
use content_intake::application::services::{AnalysisService, LanguageResolver, RedirectResolver};
use content_intake::domain::ports::{
    DetectionError, LanguageDetector, ProbeError, ProbeMethod, ProbeResponse, RedirectProbe,
};
use content_intake::domain::shorteners::ShortenerTable;
use content_intake::infrastructure::cache::CacheService;
use content_intake::infrastructure::extraction::SignalExtractor;
use content_intake::state::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Process-local cache recording every write and its TTL.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, u64)>>,
    unhealthy: AtomicBool,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unhealthy(&self) {
        self.unhealthy.store(true, Ordering::SeqCst);
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone())
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
    }

    async fn delete(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    async fn is_healthy(&self) -> bool {
        !self.unhealthy.load(Ordering::SeqCst)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Detector returning the same candidates for every input.
pub struct FixedDetector(pub Vec<(String, f64)>);

impl FixedDetector {
    pub fn new(candidates: &[(&str, f64)]) -> Self {
        Self(candidates.iter().map(|(c, s)| (c.to_string(), *s)).collect())
    }
}

impl LanguageDetector for FixedDetector {
    fn candidates(&self, _text: &str) -> Result<Vec<(String, f64)>, DetectionError> {
        Ok(self.0.clone())
    }
}

/// Probe answering from a URL -> response table; unknown URLs fail transport-wise.
#[derive(Default)]
pub struct ScriptedProbe {
    routes: HashMap<String, ProbeResponse>,
    pub calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.routes.insert(
            from.to_string(),
            ProbeResponse {
                status: 301,
                location: Some(to.to_string()),
            },
        );
        self
    }

    pub fn ok(mut self, url: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            ProbeResponse {
                status: 200,
                location: None,
            },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RedirectProbe for ScriptedProbe {
    async fn probe(&self, url: &str, _method: ProbeMethod) -> Result<ProbeResponse, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| ProbeError::Transport(format!("no route to {url}")))
    }
}

pub fn create_analysis_service(
    cache: Arc<dyn CacheService>,
    detector: FixedDetector,
    probe: Arc<ScriptedProbe>,
) -> AnalysisService {
    AnalysisService::new(
        cache.clone(),
        LanguageResolver::new(Arc::new(detector)),
        Arc::new(SignalExtractor::default()),
        RedirectResolver::new(probe, cache),
        ShortenerTable::default(),
    )
}

pub fn create_test_state(cache: Arc<dyn CacheService>) -> AppState {
    let probe = Arc::new(
        ScriptedProbe::new()
            .redirect("http://bit.ly/x", "https://example.com/landing")
            .ok("https://example.com/landing"),
    );
    let service = create_analysis_service(
        cache.clone(),
        FixedDetector::new(&[("eng", 0.92)]),
        probe,
    );

    AppState::new(Arc::new(service), cache, 2000)
}
