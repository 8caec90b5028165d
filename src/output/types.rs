//! Report types returned by a check
//!
//! Field names serialize in camelCase; these structs are the JSON wire
//! format of the HTTP service.

use crate::crawler::HighlightedElement;
use crate::state::CONNECTION_FAILED;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One link occurrence joined with its verification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInfo {
    /// Destination URL
    pub url: String,

    /// HTTP status, or 0 for a connection failure
    pub status: u16,

    /// Transport error text
    pub error: Option<String>,

    /// Page the link was found on
    pub page: String,

    /// Title of that page
    pub page_title: String,

    /// Anchor label
    pub link_text: String,

    /// Whether the destination is on the crawled site
    pub is_internal: bool,

    /// Human-readable status label
    pub status_text: String,
}

impl LinkInfo {
    /// Returns true for connection failures and any status >= 400
    pub fn is_broken(&self) -> bool {
        self.status == CONNECTION_FAILED || self.status >= 400
    }
}

/// Breakdown of broken occurrences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub internal_broken: usize,
    pub external_broken: usize,

    /// Broken occurrence count per status code
    pub status_codes: BTreeMap<u16, usize>,
}

/// Full result of one check step (or of a merged batch session)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    /// The seed URL as prepared
    pub start_url: String,

    /// Pages fetched
    pub total_pages: usize,

    /// Distinct destination URLs
    pub total_links: usize,

    /// Distinct broken destination URLs
    pub broken_links: usize,

    /// Distinct working destination URLs
    pub working_links: usize,

    pub broken_links_details: Vec<LinkInfo>,
    pub working_links_details: Vec<LinkInfo>,
    pub summary: Summary,

    /// RFC 3339 UTC timestamp of report creation
    pub timestamp: String,

    /// Every URL fetched so far, earlier steps included
    #[serde(default)]
    pub visited_urls: Vec<String>,

    /// URLs still waiting, in FIFO order
    #[serde(default)]
    pub next_urls_to_visit: Vec<String>,

    /// True if the crawl stopped on its budget with URLs still waiting
    #[serde(default)]
    pub has_more: bool,
}

/// Result of a link-details lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetailsResponse {
    pub page_url: String,
    pub broken_link_url: String,

    /// Anchors on the page that point at `broken_link_url`
    pub highlighted_elements: Vec<HighlightedElement>,

    /// The refetched page body
    pub full_html: String,
}
