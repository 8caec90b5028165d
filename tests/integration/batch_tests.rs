//! Integration tests for batched sessions

use crate::common::{mount_tree_site, spawn_app, test_config};
use link_sweep::batch::{BatchOrchestrator, LocalStep, RemoteStep};
use link_sweep::check::{CheckRequest, Checker};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_local_batches_cover_whole_site() {
    let mock_server = MockServer::start().await;
    mount_tree_site(&mock_server).await;

    let checker = Arc::new(Checker::new(&test_config()).unwrap());
    let single = checker
        .check(&CheckRequest::new(mock_server.uri(), 100))
        .await
        .unwrap();

    let orchestrator = BatchOrchestrator::new(LocalStep::new(checker), 2);
    let report = orchestrator.run(&mock_server.uri(), 100).await.unwrap();

    assert_eq!(report.batches_planned, 50);
    assert_eq!(report.batches_run, 3);
    assert_eq!(report.batches_skipped, 0);
    assert!(report.is_complete());

    let result = report.result;
    assert_eq!(result.total_pages, single.total_pages);
    assert_eq!(result.total_links, single.total_links);
    assert_eq!(result.broken_links, single.broken_links);
    assert_eq!(result.working_links, single.working_links);
    assert_eq!(result.visited_urls, single.visited_urls);
    assert!(result.broken_links + result.working_links <= result.total_links);
}

#[tokio::test]
async fn test_remote_batches_through_api() {
    let mock_server = MockServer::start().await;
    mount_tree_site(&mock_server).await;
    let app = spawn_app(&test_config()).await;

    let step = RemoteStep::new(&app, Duration::from_secs(30)).unwrap();
    let report = BatchOrchestrator::new(step, 4)
        .run(&mock_server.uri(), 8)
        .await
        .unwrap();

    assert_eq!(report.batches_planned, 2);
    assert_eq!(report.batches_run, 2);
    assert!(report.is_complete());
    assert_eq!(report.result.total_pages, 6);
    assert_eq!(report.result.total_links, 6);
}

#[tokio::test]
async fn test_remote_timeouts_are_skipped() {
    let slow_service = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/check"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&slow_service)
        .await;

    let step = RemoteStep::new(&slow_service.uri(), Duration::from_millis(200)).unwrap();
    let report = BatchOrchestrator::new(step, 1)
        .run("https://example.com", 2)
        .await
        .unwrap();

    assert_eq!(report.batches_skipped, 2);
    assert_eq!(report.batches_run, 0);
    assert!(!report.is_complete());
    assert_eq!(report.result.total_links, 0);
}

#[tokio::test]
async fn test_remote_client_errors_abort() {
    let app = spawn_app(&test_config()).await;

    let step = RemoteStep::new(&app, Duration::from_secs(5)).unwrap();
    let result = BatchOrchestrator::new(step, 1).run("   ", 3).await;

    match result {
        Err(link_sweep::SweepError::StepFailed { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "URL is required");
        }
        other => panic!("expected StepFailed, got {:?}", other.map(|r| r.batches_run)),
    }
}
