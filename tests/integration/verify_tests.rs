//! Integration tests for link verification

use crate::common::{mount_page, test_config};
use link_sweep::check::{CheckRequest, Checker};
use link_sweep::crawler::build_http_client;
use link_sweep::verifier::{ProbePolicy, ProgressCallback, Verifier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn verifier() -> Verifier {
    let config = test_config();
    let client = build_http_client(&config.user_agent, Duration::from_secs(5), 5).unwrap();
    Verifier::new(client, &config.verifier)
}

#[tokio::test]
async fn test_head_success_skips_get() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = verifier()
        .check_link(&format!("{}/ok", mock_server.uri()))
        .await;
    assert_eq!(result.status, 200);
    assert!(!result.is_broken());
}

#[tokio::test]
async fn test_head_rejected_falls_back_to_get() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = verifier()
        .check_link(&format!("{}/no-head", mock_server.uri()))
        .await;
    assert_eq!(result.status, 200);
}

#[tokio::test]
async fn test_get_is_authoritative_after_fallback() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let result = verifier()
        .check_link(&format!("{}/forbidden", mock_server.uri()))
        .await;
    assert_eq!(result.status, 403);
    assert!(result.is_broken());
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_server_errors_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = verifier()
        .check_link(&format!("{}/down", mock_server.uri()))
        .await;
    assert_eq!(result.status, 503);
}

#[tokio::test]
async fn test_unreachable_host_reported_as_failed() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="http://localhost:1/nowhere">Dead host</a>"#,
    )
    .await;

    let checker = Checker::new(&test_config()).unwrap();
    let response = checker
        .check(&CheckRequest::new(mock_server.uri(), 1))
        .await
        .unwrap();

    let broken = &response.broken_links_details[0];
    assert_eq!(broken.url, "http://localhost:1/nowhere");
    assert_eq!(broken.status, 0);
    assert_eq!(broken.status_text, "Failed");
    assert!(broken.error.is_some());
    assert!(!broken.is_internal);
    assert_eq!(response.summary.external_broken, 1);
    assert_eq!(response.summary.status_codes.get(&0), Some(&1));
}

#[tokio::test]
async fn test_verify_many_with_progress() {
    let mock_server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..30)
        .map(|i| format!("{}/page/{}", mock_server.uri(), i))
        .collect();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let progress: ProgressCallback = Arc::new(move |_, total| {
        assert_eq!(total, 30);
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let results = verifier()
        .with_policy(ProbePolicy {
            retries: 0,
            backoff: Duration::from_millis(1),
        })
        .with_progress_callback(progress)
        .verify(&urls, 15)
        .await;

    assert_eq!(results.len(), 30);
    assert!(results.values().all(|r| r.status == 200));
    assert_eq!(calls.load(Ordering::SeqCst), 30);
}
