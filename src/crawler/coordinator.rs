//! Crawler coordinator - main crawl loop
//!
//! This module drives one crawl step over a `CrawlSession`:
//! - Popping URLs from the frontier in FIFO order
//! - Fetching each page and recording a `PageRecord`
//! - Extracting anchors and recording every link occurrence
//! - Enqueueing internal destinations for later visits
//! - Stopping on budget or on an empty frontier

use crate::crawler::fetcher::{fetch_page, FetchResult};
use crate::crawler::links::{LinkIndex, LinkOccurrence};
use crate::crawler::parser::parse_html;
use crate::crawler::session::{CrawlSession, SessionSnapshot};
use crate::state::{CrawlPhase, PageRecord};
use crate::url::{is_internal, Normalizer};
use crate::SweepError;
use reqwest::Client;
use std::collections::HashSet;

/// Everything one crawl step produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// One record per page visited by this step, in visit order
    pub pages: Vec<PageRecord>,

    /// Link occurrences grouped by destination, in discovery order
    pub links: LinkIndex,

    /// Stopping state to hand to the next step
    pub snapshot: SessionSnapshot,

    /// Why the step stopped
    pub phase: CrawlPhase,

    /// Host used for internal/external classification
    pub base_domain: String,
}

/// Breadth-first crawler over a single site
#[derive(Debug, Clone)]
pub struct Crawler {
    client: Client,
    normalizer: Normalizer,
}

impl Crawler {
    /// Creates a crawler from a prepared HTTP client
    pub fn new(client: Client, normalizer: Normalizer) -> Self {
        Self { client, normalizer }
    }

    /// Runs the BFS loop until the budget is spent or the frontier is empty
    ///
    /// Page fetches are sequential. A page that fails to fetch is recorded
    /// and the crawl moves on; only an illegal phase transition is an error.
    pub async fn crawl(&self, mut session: CrawlSession) -> Result<CrawlOutcome, SweepError> {
        let mut phase = CrawlPhase::Ready;
        phase.transition(CrawlPhase::Running)?;

        tracing::info!(
            "Crawling {} (budget {}, {} queued, {} already visited)",
            session.base_domain(),
            session.page_budget(),
            session.frontier_len(),
            session.visited_len()
        );

        let start_time = std::time::Instant::now();
        let mut pages = Vec::new();
        let mut links = LinkIndex::new();

        while session.has_budget() {
            let Some(url) = session.pop_next() else {
                break;
            };
            if !session.mark_visited(&url) {
                continue;
            }

            tracing::debug!("Fetching page {}/{}: {}", session.pages_visited(), session.page_budget(), url);

            let record = self.visit(&url, &mut session, &mut links).await;
            if let Some(error) = &record.error {
                tracing::warn!("Failed to fetch {}: {}", url, error);
            }
            pages.push(record);
        }

        let snapshot = session.snapshot();
        let terminal = if snapshot.has_more {
            CrawlPhase::BudgetReached
        } else {
            CrawlPhase::Exhausted
        };
        phase.transition(terminal)?;

        tracing::info!(
            "Crawl step {}: {} pages, {} unique links, {} queued, in {:?}",
            phase,
            pages.len(),
            links.len(),
            snapshot.next_urls_to_visit.len(),
            start_time.elapsed()
        );

        Ok(CrawlOutcome {
            pages,
            links,
            snapshot,
            phase,
            base_domain: session.base_domain().to_string(),
        })
    }

    /// Fetches one page and folds its links into the session and index
    async fn visit(
        &self,
        url: &str,
        session: &mut CrawlSession,
        links: &mut LinkIndex,
    ) -> PageRecord {
        match fetch_page(&self.client, url).await {
            FetchResult::Html {
                final_url,
                status_code,
                content_type,
                body,
            } => {
                if final_url != url {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }

                let parsed = parse_html(&body);
                let mut destinations = Vec::new();
                let mut seen_here = HashSet::new();

                for anchor in parsed.anchors {
                    // Relative hrefs resolve against the URL as visited
                    let Some(destination) = self.normalizer.normalize(&anchor.href, url) else {
                        tracing::trace!("Skipping href {:?} on {}", anchor.href, url);
                        continue;
                    };

                    links.record(LinkOccurrence {
                        url: destination.clone(),
                        page: url.to_string(),
                        link_text: anchor.text,
                        page_title: parsed.title.clone(),
                    });

                    if is_internal(&destination, session.base_domain()) {
                        session.enqueue(destination.clone());
                    }

                    if seen_here.insert(destination.clone()) {
                        destinations.push(destination);
                    }
                }

                PageRecord {
                    url: url.to_string(),
                    status: status_code,
                    error: None,
                    title: Some(parsed.title),
                    content_type: Some(content_type),
                    links: destinations,
                }
            }

            FetchResult::NonHtml {
                status_code,
                content_type,
            } => {
                tracing::debug!("Not parsing {} ({})", url, content_type);
                PageRecord {
                    url: url.to_string(),
                    status: status_code,
                    error: None,
                    title: None,
                    content_type: (!content_type.is_empty()).then_some(content_type),
                    links: Vec::new(),
                }
            }

            FetchResult::NetworkError { status_code, error } => {
                PageRecord::failed(url, status_code, error)
            }
        }
    }
}
