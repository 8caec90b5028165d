//! Crawl session state: the frontier and the visited set
//!
//! A session is owned by exactly one crawl step. Between steps it travels as
//! a `SessionSnapshot`, which is plain data and can be serialized into an API
//! response and fed back into the next request.

use crate::url::{extract_domain, Normalizer};
use crate::UrlError;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Serializable stopping state of a crawl step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Every URL fetched so far, including earlier steps, in visit order
    pub visited_urls: Vec<String>,

    /// URLs still waiting to be fetched, in FIFO order
    pub next_urls_to_visit: Vec<String>,

    /// True if the step stopped on its budget with URLs still waiting
    pub has_more: bool,
}

/// Mutable BFS state for one crawl step
///
/// Invariants:
/// - `frontier` and `queued` always hold the same URLs
/// - no URL is both visited and queued
/// - at most `page_budget` pages are visited by this step
#[derive(Debug, Clone)]
pub struct CrawlSession {
    base_domain: String,
    page_budget: usize,
    visited: HashSet<String>,
    visit_order: Vec<String>,
    frontier: VecDeque<String>,
    queued: HashSet<String>,
    carried_over: usize,
}

impl CrawlSession {
    /// Starts a fresh session seeded with the normalized start URL
    pub fn fresh(seed: &Url, page_budget: usize, normalizer: &Normalizer) -> Result<Self, UrlError> {
        let mut session = Self::empty(seed, page_budget)?;
        session.enqueue(normalizer.normalize_seed(seed));
        Ok(session)
    }

    /// Resumes a session from caller-supplied visited and frontier lists
    ///
    /// When both lists are empty this is the same as `fresh`. Frontier
    /// entries that were already visited, or listed twice, are dropped while
    /// the remaining order is kept.
    pub fn resume(
        seed: &Url,
        page_budget: usize,
        visited_urls: Vec<String>,
        next_urls_to_visit: Vec<String>,
        normalizer: &Normalizer,
    ) -> Result<Self, UrlError> {
        if visited_urls.is_empty() && next_urls_to_visit.is_empty() {
            return Self::fresh(seed, page_budget, normalizer);
        }

        let mut session = Self::empty(seed, page_budget)?;
        for url in visited_urls {
            if session.visited.insert(url.clone()) {
                session.visit_order.push(url);
            }
        }
        session.carried_over = session.visited.len();

        for url in next_urls_to_visit {
            session.enqueue(url);
        }

        Ok(session)
    }

    fn empty(seed: &Url, page_budget: usize) -> Result<Self, UrlError> {
        let base_domain = extract_domain(seed).ok_or(UrlError::MissingDomain)?;
        Ok(Self {
            base_domain,
            page_budget,
            visited: HashSet::new(),
            visit_order: Vec::new(),
            frontier: VecDeque::new(),
            queued: HashSet::new(),
            carried_over: 0,
        })
    }

    /// Host that decides what counts as internal
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Page budget of this step
    pub fn page_budget(&self) -> usize {
        self.page_budget
    }

    /// Pages visited by this step (excludes URLs carried over from earlier steps)
    pub fn pages_visited(&self) -> usize {
        self.visited.len() - self.carried_over
    }

    /// Returns true while this step may visit another page
    pub fn has_budget(&self) -> bool {
        self.pages_visited() < self.page_budget
    }

    /// Returns true if `url` is waiting in the frontier
    pub fn is_queued(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    /// Appends `url` to the frontier unless it is visited or already queued
    ///
    /// Returns true if the URL was added.
    pub fn enqueue(&mut self, url: String) -> bool {
        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.frontier.push_back(url);
        true
    }

    /// Takes the next URL from the front of the frontier
    pub fn pop_next(&mut self) -> Option<String> {
        let url = self.frontier.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    /// Marks `url` as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if !self.visited.insert(url.to_string()) {
            return false;
        }
        self.visit_order.push(url.to_string());
        true
    }

    /// Number of URLs waiting in the frontier
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Total number of visited URLs, carried-over ones included
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Captures the state for hand-off to the next step
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            visited_urls: self.visit_order.clone(),
            next_urls_to_visit: self.frontier.iter().cloned().collect(),
            has_more: !self.frontier.is_empty(),
        }
    }
}
