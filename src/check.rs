//! One check step: crawl, verify, report
//!
//! A `Checker` owns the two HTTP clients (page fetching and link probing)
//! and is shared by every request the service handles.

use crate::config::Config;
use crate::crawler::{build_http_client, find_matching_anchors, CrawlSession, Crawler};
use crate::output::{assemble, CheckResponse, LinkDetailsResponse};
use crate::url::{prepare_seed, Normalizer, SchemePolicy};
use crate::verifier::Verifier;
use crate::SweepError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Links between two verification progress log lines
const PROGRESS_LOG_INTERVAL: usize = 50;

/// Input of one check step
///
/// Empty `visited_urls` and `next_urls_to_visit` start a fresh crawl;
/// otherwise the crawl resumes from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckRequest {
    pub url: Option<String>,
    pub max_pages: Option<usize>,
    pub visited_urls: Vec<String>,
    pub next_urls_to_visit: Vec<String>,
}

impl CheckRequest {
    /// A fresh request for `url` with the given page budget
    pub fn new(url: impl Into<String>, max_pages: usize) -> Self {
        Self {
            url: Some(url.into()),
            max_pages: Some(max_pages),
            ..Self::default()
        }
    }

    /// Continues from the state a previous step handed back
    pub fn resume_from(mut self, previous: &CheckResponse) -> Self {
        self.visited_urls = previous.visited_urls.clone();
        self.next_urls_to_visit = previous.next_urls_to_visit.clone();
        self
    }
}

/// Runs check steps and link-details lookups
#[derive(Debug, Clone)]
pub struct Checker {
    crawler: Crawler,
    verifier: Verifier,
    page_client: Client,
    normalizer: Normalizer,
    default_max_pages: usize,
}

impl Checker {
    /// Builds the clients and components described by `config`
    pub fn new(config: &Config) -> Result<Self, SweepError> {
        let page_client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.request_timeout_secs),
            config.crawler.max_redirects,
        )?;
        let probe_client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.verifier.request_timeout_secs),
            config.crawler.max_redirects,
        )?;

        let normalizer =
            Normalizer::new(SchemePolicy::from_upgrade_flag(config.crawler.upgrade_insecure));

        Ok(Self {
            crawler: Crawler::new(page_client.clone(), normalizer),
            verifier: Verifier::new(probe_client, &config.verifier)
                .with_progress_callback(Arc::new(log_progress)),
            page_client,
            normalizer,
            default_max_pages: config.crawler.default_max_pages,
        })
    }

    /// Runs one crawl step and verifies every link it found
    ///
    /// # Errors
    ///
    /// * `MissingUrl` - the request has no URL or a blank one
    /// * `InvalidSeed` - the URL cannot be turned into a crawlable seed
    ///
    /// Per-page and per-link failures are part of the report, not errors.
    pub async fn check(&self, request: &CheckRequest) -> Result<CheckResponse, SweepError> {
        let raw = request
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SweepError::MissingUrl)?;

        let seed = prepare_seed(raw).map_err(|e| SweepError::InvalidSeed(e.to_string()))?;
        let budget = request.max_pages.unwrap_or(self.default_max_pages).max(1);

        let session = CrawlSession::resume(
            &seed,
            budget,
            request.visited_urls.clone(),
            request.next_urls_to_visit.clone(),
            &self.normalizer,
        )?;

        let outcome = self.crawler.crawl(session).await?;
        let verifications = self.verifier.verify_all(outcome.links.urls()).await;

        let start_url = self.normalizer.normalize_seed(&seed);
        Ok(assemble(&start_url, &outcome, &verifications))
    }

    /// Refetches `page_url` and returns the anchors pointing at `broken_link_url`
    ///
    /// Unlike crawling, a non-success status here is an error: there is no
    /// page to show.
    pub async fn link_details(
        &self,
        page_url: &str,
        broken_link_url: &str,
    ) -> Result<LinkDetailsResponse, SweepError> {
        let body = self
            .page_client
            .get(page_url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| SweepError::Http {
                url: page_url.to_string(),
                source,
            })?
            .text()
            .await
            .map_err(|source| SweepError::Http {
                url: page_url.to_string(),
                source,
            })?;

        let highlighted_elements =
            find_matching_anchors(&body, page_url, broken_link_url, &self.normalizer);
        tracing::debug!(
            "Found {} anchors for {} on {}",
            highlighted_elements.len(),
            broken_link_url,
            page_url
        );

        Ok(LinkDetailsResponse {
            page_url: page_url.to_string(),
            broken_link_url: broken_link_url.to_string(),
            highlighted_elements,
            full_html: body,
        })
    }
}

fn log_progress(checked: usize, total: usize) {
    if checked == total || checked % PROGRESS_LOG_INTERVAL == 0 {
        tracing::debug!("Verified {}/{} links", checked, total);
    }
}
