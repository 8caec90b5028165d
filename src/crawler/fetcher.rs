//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients that identify as a regular browser
//! - GET requests to fetch page content, accepting every status code
//! - Content-Type gating (only HTML bodies are read)
//! - Error classification

use crate::config::UserAgentConfig;
use crate::state::CONNECTION_FAILED;
use crate::{ConfigError, SweepError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Result of a fetch operation
///
/// Every HTTP status, 4xx and 5xx included, is a successful observation;
/// only transport failures end up in `NetworkError`.
#[derive(Debug)]
pub enum FetchResult {
    /// An HTML page was fetched
    Html {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// The response was not HTML; the body is never read
    NonHtml {
        /// HTTP status code
        status_code: u16,
        /// The Content-Type received (empty if absent)
        content_type: String,
    },

    /// The request produced no usable response
    NetworkError {
        /// Status if a response arrived before the failure, else `CONNECTION_FAILED`
        status_code: u16,
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with browser identification headers
///
/// # Arguments
///
/// * `user_agent` - Identification headers sent with every request
/// * `timeout` - Total timeout for a single request
/// * `max_redirects` - Redirect hops followed before giving up
///
/// # Example
///
/// ```no_run
/// use link_sweep::config::UserAgentConfig;
/// use link_sweep::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10), 5).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
    max_redirects: usize,
) -> Result<Client, SweepError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, header_value("accept", &user_agent.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("accept-language", &user_agent.accept_language)?,
    );

    let client = Client::builder()
        .user_agent(user_agent.browser.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(max_redirects))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, SweepError> {
    HeaderValue::from_str(value).map_err(|e| {
        SweepError::Config(ConfigError::Validation(format!(
            "invalid {} header value: {}",
            name, e
        )))
    })
}

/// Fetches a page with a full GET request
///
/// # Request Flow
///
/// 1. Send GET (redirects followed up to the client's limit)
/// 2. Accept whatever status comes back
/// 3. If the Content-Type contains `text/html`, read the body
/// 4. Otherwise report `NonHtml` without reading the body
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchResult::NetworkError {
                status_code: e.status().map_or(CONNECTION_FAILED, |s| s.as_u16()),
                error: describe_error(&e),
            }
        }
    };

    let status_code = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return FetchResult::NonHtml {
            status_code,
            content_type,
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Html {
            final_url,
            status_code,
            content_type,
            body,
        },
        Err(e) => FetchResult::NetworkError {
            status_code,
            error: describe_error(&e),
        },
    }
}

/// Produces a readable description of a transport error
pub(crate) fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Request timeout: {}", error)
    } else if error.is_redirect() {
        format!("Too many redirects: {}", error)
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    }
}
