mod common;

use common::InMemoryCache;
use content_intake::application::services::RedirectResolver;
use content_intake::domain::entities::MAX_REDIRECTS;
use content_intake::domain::ports::{ProbeError, ProbeMethod, RedirectProbe};
use content_intake::infrastructure::http::{DEFAULT_USER_AGENT, ReqwestProbe};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn probe() -> ReqwestProbe {
    ReqwestProbe::new(Duration::from_millis(2000), DEFAULT_USER_AGENT).unwrap()
}

fn resolver() -> RedirectResolver {
    RedirectResolver::new(Arc::new(probe()), Arc::new(InMemoryCache::new()))
}

#[tokio::test]
async fn test_head_probe_reads_location_without_following() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/x"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/landing"))
        .expect(1)
        .mount(&server)
        .await;

    let response = probe()
        .probe(&format!("{}/x", server.uri()), ProbeMethod::Head)
        .await
        .unwrap();

    assert_eq!(response.status, 301);
    assert_eq!(response.location.as_deref(), Some("/landing"));
}

#[tokio::test]
async fn test_error_status_is_a_probe_failure() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let result = probe()
        .probe(&format!("{}/x", server.uri()), ProbeMethod::Head)
        .await;

    assert!(matches!(result, Err(ProbeError::Status(405))));
}

#[tokio::test]
async fn test_slow_target_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let probe = ReqwestProbe::new(Duration::from_millis(100), DEFAULT_USER_AGENT).unwrap();
    let result = probe
        .probe(&format!("{}/slow", server.uri()), ProbeMethod::Head)
        .await;

    assert!(matches!(result, Err(ProbeError::Timeout(100))));
}

#[tokio::test]
async fn test_chain_resolved_to_final_destination() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/b"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "c"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let outcome = resolver()
        .resolve_redirects(&format!("{}/a", server.uri()))
        .await;

    assert_eq!(outcome.final_url, format!("{}/c", server.uri()));
    assert_eq!(outcome.redirect_count, 2);
}

#[tokio::test]
async fn test_head_rejected_falls_back_to_ranged_get() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/short"))
        .and(header("range", "bytes=0-0"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/long"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/long"))
        .and(header("range", "bytes=0-0"))
        .respond_with(ResponseTemplate::new(206))
        .mount(&server)
        .await;

    let outcome = resolver()
        .resolve_redirects(&format!("{}/short", server.uri()))
        .await;

    assert_eq!(outcome.final_url, format!("{}/long", server.uri()));
    assert_eq!(outcome.redirect_count, 1);
}

/// Redirects `/n` to `/n+1` forever.
struct Endless;

impl Respond for Endless {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let n: u32 = request
            .url
            .path()
            .trim_start_matches('/')
            .parse()
            .unwrap_or(0);
        ResponseTemplate::new(302).insert_header("Location", format!("/{}", n + 1).as_str())
    }
}

#[tokio::test]
async fn test_endless_redirects_stop_at_bound() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(Endless)
        .mount(&server)
        .await;

    let outcome = resolver()
        .resolve_redirects(&format!("{}/0", server.uri()))
        .await;

    assert_eq!(outcome.redirect_count, MAX_REDIRECTS);
    assert_eq!(outcome.final_url, format!("{}/10", server.uri()));
}

#[tokio::test]
async fn test_two_node_cycle_terminates_early() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/pong"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/pong"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/ping"))
        .mount(&server)
        .await;

    let outcome = resolver()
        .resolve_redirects(&format!("{}/ping", server.uri()))
        .await;

    assert!(outcome.redirect_count < MAX_REDIRECTS);
    assert!(!outcome.final_url.is_empty());
}

#[tokio::test]
async fn test_unreachable_target_returns_original_url() {
    let outcome = resolver().resolve_redirects("http://127.0.0.1:1/x").await;

    assert_eq!(outcome.final_url, "http://127.0.0.1:1/x");
    assert_eq!(outcome.redirect_count, 0);
}
