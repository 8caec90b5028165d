//! Integration tests for the crawl step
//!
//! These tests run the full crawl, verify, report cycle against wiremock
//! sites through `Checker::check`.

use crate::common::{mount_page, mount_tree_site, test_config};
use link_sweep::check::{CheckRequest, Checker};
use link_sweep::crawler::{build_http_client, CrawlSession, Crawler};
use link_sweep::state::CrawlPhase;
use link_sweep::{Normalizer, SchemePolicy};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_self_link_and_missing_page() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/">Home</a><a href="/missing">Missing</a>"#,
    )
    .await;

    let checker = Checker::new(&test_config()).unwrap();
    let response = checker
        .check(&CheckRequest::new(mock_server.uri(), 1))
        .await
        .unwrap();

    assert_eq!(response.total_pages, 1);
    assert_eq!(response.total_links, 2);
    assert_eq!(response.broken_links, 1);
    assert_eq!(response.working_links, 1);

    let broken = &response.broken_links_details[0];
    assert_eq!(broken.url, format!("{}/missing", mock_server.uri()));
    assert_eq!(broken.status, 404);
    assert_eq!(broken.status_text, "Not Found");
    assert_eq!(broken.link_text, "Missing");
    assert_eq!(broken.page_title, "Home");
    assert!(broken.is_internal);

    assert_eq!(response.summary.internal_broken, 1);
    assert_eq!(response.summary.external_broken, 0);
    assert!(response.has_more);
    assert_eq!(
        response.next_urls_to_visit,
        vec![format!("{}/missing", mock_server.uri())]
    );
}

#[tokio::test]
async fn test_link_on_two_pages_counted_once() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/about">About</a><a href="/gone">Gone</a>"#,
    )
    .await;
    mount_page(&mock_server, "/about", "About", r#"<a href="/gone#top">Gone again</a>"#).await;

    let checker = Checker::new(&test_config()).unwrap();
    let response = checker
        .check(&CheckRequest::new(mock_server.uri(), 10))
        .await
        .unwrap();

    // /, /about and the 404 page itself
    assert_eq!(response.total_pages, 3);
    assert_eq!(response.total_links, 2);
    assert_eq!(response.broken_links, 1);
    assert_eq!(response.broken_links_details.len(), 2);

    let pages: Vec<_> = response
        .broken_links_details
        .iter()
        .map(|info| info.page.as_str())
        .collect();
    assert_eq!(
        pages,
        vec![
            format!("{}/", mock_server.uri()),
            format!("{}/about", mock_server.uri())
        ]
    );
    assert!(!response.has_more);
    assert!(response.next_urls_to_visit.is_empty());
}

#[tokio::test]
async fn test_budget_bounds_visits() {
    let mock_server = MockServer::start().await;
    mount_tree_site(&mock_server).await;

    let checker = Checker::new(&test_config()).unwrap();
    for budget in [1, 3, 6, 20] {
        let response = checker
            .check(&CheckRequest::new(mock_server.uri(), budget))
            .await
            .unwrap();
        assert!(response.total_pages <= budget);
        assert_eq!(response.visited_urls.len(), response.total_pages);
        assert_eq!(response.has_more, !response.next_urls_to_visit.is_empty());
    }
}

#[tokio::test]
async fn test_resumed_steps_match_single_step() {
    let mock_server = MockServer::start().await;
    mount_tree_site(&mock_server).await;
    let checker = Checker::new(&test_config()).unwrap();

    let single = checker
        .check(&CheckRequest::new(mock_server.uri(), 4))
        .await
        .unwrap();

    let first = checker
        .check(&CheckRequest::new(mock_server.uri(), 2))
        .await
        .unwrap();
    assert!(first.has_more);
    let second = checker
        .check(&CheckRequest::new(mock_server.uri(), 2).resume_from(&first))
        .await
        .unwrap();

    assert_eq!(second.visited_urls, single.visited_urls);
    assert_eq!(second.next_urls_to_visit, single.next_urls_to_visit);
    assert_eq!(first.total_pages + second.total_pages, single.total_pages);

    let mut aggregate = link_sweep::AggregateResult::new(mock_server.uri());
    aggregate.merge(first);
    aggregate.merge(second);
    assert_eq!(aggregate.total_links(), single.total_links);
}

#[tokio::test]
async fn test_non_html_pages_not_parsed() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "Home", r#"<a href="/data.json">Data</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"href": "<a href=\"/hidden\">x</a>"}"#, "application/json"),
        )
        .mount(&mock_server)
        .await;

    let checker = Checker::new(&test_config()).unwrap();
    let response = checker
        .check(&CheckRequest::new(mock_server.uri(), 10))
        .await
        .unwrap();

    assert_eq!(response.total_pages, 2);
    assert_eq!(response.total_links, 1);
    assert_eq!(response.working_links, 1);
}

#[tokio::test]
async fn test_non_fetchable_schemes_skipped() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "Home",
        r##"<a href="mailto:a@b.c">Mail</a><a href="tel:123">Call</a>
           <a href="javascript:void(0)">JS</a><a href="#section">Anchor</a>"##,
    )
    .await;

    let checker = Checker::new(&test_config()).unwrap();
    let response = checker
        .check(&CheckRequest::new(mock_server.uri(), 5))
        .await
        .unwrap();

    // Only the fragment link survives, and it is the page itself
    assert_eq!(response.total_links, 1);
    assert_eq!(response.working_links_details[0].url, format!("{}/", mock_server.uri()));
}

#[tokio::test]
async fn test_crawler_phases() {
    let mock_server = MockServer::start().await;
    mount_tree_site(&mock_server).await;

    let config = test_config();
    let client = build_http_client(&config.user_agent, Duration::from_secs(5), 5).unwrap();
    let normalizer = Normalizer::new(SchemePolicy::Preserve);
    let crawler = Crawler::new(client, normalizer);
    let seed = url::Url::parse(&mock_server.uri()).unwrap();

    let partial = crawler
        .crawl(CrawlSession::fresh(&seed, 2, &normalizer).unwrap())
        .await
        .unwrap();
    assert_eq!(partial.phase, CrawlPhase::BudgetReached);
    assert_eq!(partial.pages.len(), 2);

    let full = crawler
        .crawl(CrawlSession::fresh(&seed, 100, &normalizer).unwrap())
        .await
        .unwrap();
    assert_eq!(full.phase, CrawlPhase::Exhausted);
    assert_eq!(full.pages.len(), 6);
    assert!(full.pages.iter().all(|page| page.status == 200));
    assert_eq!(full.pages[0].links.len(), 3);
}
