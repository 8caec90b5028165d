//! Link occurrence bookkeeping
//!
//! Every destination URL found during a crawl keeps the list of places it
//! was found on. Destinations are kept in discovery order so reports come
//! out in the same order the crawl saw them.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One appearance of a destination URL on a source page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOccurrence {
    /// Normalized destination URL
    pub url: String,

    /// The page the link was found on
    pub page: String,

    /// Anchor label
    pub link_text: String,

    /// Title of the page the link was found on
    pub page_title: String,
}

/// Occurrences grouped by destination URL
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    order: Vec<String>,
    occurrences: HashMap<String, Vec<LinkOccurrence>>,
    seen: HashSet<(String, String)>,
}

impl LinkIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an occurrence
    ///
    /// Only the first occurrence of a destination on a given page is kept,
    /// so a menu repeating the same link twice counts once for that page.
    /// Returns true if the occurrence was new.
    pub fn record(&mut self, occurrence: LinkOccurrence) -> bool {
        let key = (occurrence.url.clone(), occurrence.page.clone());
        if !self.seen.insert(key) {
            return false;
        }

        match self.occurrences.get_mut(&occurrence.url) {
            Some(list) => list.push(occurrence),
            None => {
                self.order.push(occurrence.url.clone());
                self.occurrences
                    .insert(occurrence.url.clone(), vec![occurrence]);
            }
        }
        true
    }

    /// Unique destination URLs in discovery order
    pub fn urls(&self) -> &[String] {
        &self.order
    }

    /// All occurrences of `url` (empty if it was never recorded)
    pub fn occurrences(&self, url: &str) -> &[LinkOccurrence] {
        self.occurrences.get(url).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if `url` was recorded
    pub fn contains(&self, url: &str) -> bool {
        self.occurrences.contains_key(url)
    }

    /// Number of unique destination URLs
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no link was recorded
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of occurrences across all destinations
    pub fn occurrence_count(&self) -> usize {
        self.seen.len()
    }
}
