//! Cross-batch accumulation of check results

use super::report::{reconcile_counts, summarize, timestamp_now};
use super::types::{CheckResponse, LinkInfo};
use std::collections::{HashMap, HashSet};

/// Accumulates step responses into one session-wide result
///
/// Occurrences are keyed by `(url, page)`, so an occurrence reported by two
/// overlapping batches is kept once. Link counts are over distinct URLs.
#[derive(Debug, Clone, Default)]
pub struct AggregateResult {
    start_url: String,
    total_pages: usize,
    unique_links: HashSet<String>,
    broken_urls: HashSet<String>,
    working_urls: HashSet<String>,
    details: HashMap<(String, String), LinkInfo>,
    detail_order: Vec<(String, String)>,
    visited_urls: Vec<String>,
    next_urls_to_visit: Vec<String>,
    has_more: bool,
    merged: usize,
}

impl AggregateResult {
    /// Creates an empty accumulator for a session started at `start_url`
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            ..Self::default()
        }
    }

    /// Folds one step response into the accumulator
    ///
    /// The crawl state (visited, frontier, has_more) is taken from the
    /// latest response since each step hands back the full state. The
    /// first response's start URL replaces the one given to `new`.
    pub fn merge(&mut self, response: CheckResponse) {
        if self.merged == 0 && !response.start_url.is_empty() {
            self.start_url = response.start_url.clone();
        }
        self.total_pages += response.total_pages;
        self.merged += 1;

        for info in response
            .broken_links_details
            .into_iter()
            .chain(response.working_links_details)
        {
            self.unique_links.insert(info.url.clone());
            if info.is_broken() {
                self.broken_urls.insert(info.url.clone());
            } else {
                self.working_urls.insert(info.url.clone());
            }

            let key = (info.url.clone(), info.page.clone());
            if !self.details.contains_key(&key) {
                self.detail_order.push(key.clone());
                self.details.insert(key, info);
            }
        }

        self.visited_urls = response.visited_urls;
        self.next_urls_to_visit = response.next_urls_to_visit;
        self.has_more = response.has_more;
    }

    /// Number of responses merged so far
    pub fn merged_count(&self) -> usize {
        self.merged
    }

    /// Pages fetched across all merged steps
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Distinct destination URLs seen so far
    pub fn total_links(&self) -> usize {
        self.unique_links.len()
    }

    /// Latest crawl state: `(visited, frontier)`
    pub fn crawl_state(&self) -> (&[String], &[String]) {
        (&self.visited_urls, &self.next_urls_to_visit)
    }

    /// True if the latest merged step reported remaining work
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Produces the session-wide response
    pub fn finish(self) -> CheckResponse {
        let total_links = self.unique_links.len();
        let (broken_links, working_links) =
            reconcile_counts(total_links, self.broken_urls.len(), self.working_urls.len());

        let mut details = self.details;
        let (broken_details, working_details): (Vec<_>, Vec<_>) = self
            .detail_order
            .iter()
            .filter_map(|key| details.remove(key))
            .partition(LinkInfo::is_broken);

        CheckResponse {
            start_url: self.start_url,
            total_pages: self.total_pages,
            total_links,
            broken_links,
            working_links,
            summary: summarize(&broken_details),
            broken_links_details: broken_details,
            working_links_details: working_details,
            timestamp: timestamp_now(),
            visited_urls: self.visited_urls,
            next_urls_to_visit: self.next_urls_to_visit,
            has_more: self.has_more,
        }
    }
}
