//! Integration tests for the HTTP API

use crate::common::{mount_page, spawn_app, test_config};
use serde_json::{json, Value};
use wiremock::MockServer;

#[tokio::test]
async fn test_health() {
    let app = spawn_app(&test_config()).await;
    let response = reqwest::get(format!("{}/health", app)).await.unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_check_requires_url() {
    let app = spawn_app(&test_config()).await;
    let client = reqwest::Client::new();

    for body in [json!({}), json!({ "url": "" }), json!({ "url": "   ", "maxPages": 5 })] {
        let response = client
            .post(format!("{}/api/check", app))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "URL is required");
    }
}

#[tokio::test]
async fn test_check_rejects_invalid_url() {
    let app = spawn_app(&test_config()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/check", app))
        .json(&json!({ "url": "http://bad host" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid URL"));
}

#[tokio::test]
async fn test_check_rejects_malformed_json() {
    let app = spawn_app(&test_config()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/check", app))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_check_round_trip() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/">Home</a><a href="/missing">Missing</a>"#,
    )
    .await;
    let app = spawn_app(&test_config()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/check", app))
        .json(&json!({ "url": mock_server.uri(), "maxPages": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["totalLinks"], 2);
    assert_eq!(body["brokenLinks"], 1);
    assert_eq!(body["workingLinks"], 1);
    assert_eq!(body["brokenLinksDetails"][0]["statusText"], "Not Found");
    assert_eq!(body["brokenLinksDetails"][0]["isInternal"], true);
    assert_eq!(body["summary"]["statusCodes"]["404"], 1);
    assert_eq!(body["hasMore"], true);
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_link_details_requires_both_urls() {
    let app = spawn_app(&test_config()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/link-details", app))
        .json(&json!({ "pageUrl": "https://example.com/" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Page URL and broken link URL are required");
}

#[tokio::test]
async fn test_link_details_highlights_anchor() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<p>Read the <a href="/missing">old docs</a> first.</p><a href="/fine">Fine</a>"#,
    )
    .await;
    let app = spawn_app(&test_config()).await;

    let page_url = format!("{}/", mock_server.uri());
    let broken_link_url = format!("{}/missing", mock_server.uri());
    let response = reqwest::Client::new()
        .post(format!("{}/api/link-details", app))
        .json(&json!({ "pageUrl": page_url, "brokenLinkUrl": broken_link_url }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["pageUrl"], page_url);
    assert_eq!(body["brokenLinkUrl"], broken_link_url);
    let elements = body["highlightedElements"].as_array().unwrap();
    assert_eq!(elements.len(), 1);
    assert!(elements[0]["tag"].as_str().unwrap().contains("old docs"));
    assert!(elements[0]["context"].as_str().unwrap().starts_with("Read the "));
    assert!(body["fullHtml"].as_str().unwrap().contains("<title>Home</title>"));
}

#[tokio::test]
async fn test_link_details_page_error_is_500() {
    let mock_server = MockServer::start().await;
    let app = spawn_app(&test_config()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/link-details", app))
        .json(&json!({
            "pageUrl": format!("{}/nothing-here", mock_server.uri()),
            "brokenLinkUrl": "https://example.com/x"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}
