//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with browser-like headers
//! - HTML parsing and anchor extraction
//! - The resumable BFS session (frontier and visited set)
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod links;
mod parser;
mod session;

pub use coordinator::{CrawlOutcome, Crawler};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub(crate) use fetcher::describe_error;
pub use links::{LinkIndex, LinkOccurrence};
pub use parser::{
    find_matching_anchors, parse_html, Anchor, HighlightedElement, ParsedPage, IMAGE_MARKER,
    MAX_LINK_TEXT, NO_TITLE,
};
pub use session::{CrawlSession, SessionSnapshot};
