//! Shared fixtures for the integration tests

use link_sweep::check::Checker;
use link_sweep::config::Config;
use link_sweep::server::{router, AppState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration suited to plain-http mock servers and fast retries
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.upgrade_insecure = false;
    config.crawler.request_timeout_secs = 5;
    config.verifier.request_timeout_secs = 5;
    config.verifier.backoff_ms = 10;
    config
}

/// Mounts an HTML page answering GET requests on `route`
pub async fn mount_page(server: &MockServer, route: &str, title: &str, body: &str) {
    let html = format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    );
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

/// Mounts a six-page site:
///
/// ```text
/// /   -> /p1 /p2 /p3
/// /p1 -> /p4 /
/// /p2 -> /p5 /
/// /p3 /p4 /p5 -> /
/// ```
pub async fn mount_tree_site(server: &MockServer) {
    mount_page(
        server,
        "/",
        "Home",
        r#"<a href="/p1">One</a><a href="/p2">Two</a><a href="/p3">Three</a>"#,
    )
    .await;
    mount_page(server, "/p1", "One", r#"<a href="/p4">Four</a><a href="/">Home</a>"#).await;
    mount_page(server, "/p2", "Two", r#"<a href="/p5">Five</a><a href="/">Home</a>"#).await;
    for (route, title) in [("/p3", "Three"), ("/p4", "Four"), ("/p5", "Five")] {
        mount_page(server, route, title, r#"<a href="/">Home</a>"#).await;
    }
}

/// Starts the API on an ephemeral port and returns its base URL
pub async fn spawn_app(config: &Config) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    let state = AppState::new(Checker::new(config).expect("Failed to build checker"));

    tokio::spawn(async move {
        axum::serve(listener, router(state))
            .await
            .expect("Test server failed");
    });

    format!("http://{}", addr)
}
