//! Report assembly
//!
//! Joins the crawl's occurrence index with the verifier's per-URL results
//! and splits every occurrence into the broken or the working list.

use super::types::{CheckResponse, LinkInfo, Summary};
use crate::crawler::CrawlOutcome;
use crate::url::is_internal;
use crate::verifier::LinkVerification;
use chrono::{SecondsFormat, Utc};
use std::collections::{HashMap, HashSet};

/// Maps a status code to its display label
///
/// # Examples
///
/// ```
/// use link_sweep::output::status_text;
///
/// assert_eq!(status_text(0), "Failed");
/// assert_eq!(status_text(404), "Not Found");
/// assert_eq!(status_text(429), "Error 429");
/// assert_eq!(status_text(301), "OK");
/// ```
pub fn status_text(status: u16) -> String {
    match status {
        0 => "Failed".to_string(),
        404 => "Not Found".to_string(),
        403 => "Forbidden".to_string(),
        500 => "Server Error".to_string(),
        code if code >= 400 => format!("Error {}", code),
        _ => "OK".to_string(),
    }
}

/// Current time in the report timestamp format
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Keeps `broken + working <= total`
///
/// When the sum overflows (a URL seen broken in one batch and working in
/// another), the working count is recomputed as `total - broken`.
pub fn reconcile_counts(total: usize, broken: usize, working: usize) -> (usize, usize) {
    if broken + working > total {
        (broken, total.saturating_sub(broken))
    } else {
        (broken, working)
    }
}

/// Counts broken occurrences by locality and status code
pub fn summarize(broken: &[LinkInfo]) -> Summary {
    let mut summary = Summary::default();
    for info in broken {
        if info.is_internal {
            summary.internal_broken += 1;
        } else {
            summary.external_broken += 1;
        }
        *summary.status_codes.entry(info.status).or_insert(0) += 1;
    }
    summary
}

/// Builds the response for one check step
///
/// Destinations are walked in discovery order and every occurrence becomes
/// one `LinkInfo`. Destinations missing from `verifications` are left out
/// of the report.
pub fn assemble(
    start_url: &str,
    outcome: &CrawlOutcome,
    verifications: &HashMap<String, LinkVerification>,
) -> CheckResponse {
    let mut broken_details = Vec::new();
    let mut working_details = Vec::new();
    let mut broken_urls = HashSet::new();
    let mut working_urls = HashSet::new();

    for url in outcome.links.urls() {
        let Some(verification) = verifications.get(url) else {
            tracing::debug!("No verification result for {}", url);
            continue;
        };

        let internal = is_internal(url, &outcome.base_domain);
        let broken = verification.is_broken();
        let infos = outcome.links.occurrences(url).iter().map(|o| LinkInfo {
            url: url.clone(),
            status: verification.status,
            error: verification.error.clone(),
            page: o.page.clone(),
            page_title: o.page_title.clone(),
            link_text: o.link_text.clone(),
            is_internal: internal,
            status_text: status_text(verification.status),
        });

        if broken {
            broken_urls.insert(url.as_str());
            broken_details.extend(infos);
        } else {
            working_urls.insert(url.as_str());
            working_details.extend(infos);
        }
    }

    let total_links = outcome.links.len();
    let (broken_links, working_links) =
        reconcile_counts(total_links, broken_urls.len(), working_urls.len());

    CheckResponse {
        start_url: start_url.to_string(),
        total_pages: outcome.pages.len(),
        total_links,
        broken_links,
        working_links,
        summary: summarize(&broken_details),
        broken_links_details: broken_details,
        working_links_details: working_details,
        timestamp: timestamp_now(),
        visited_urls: outcome.snapshot.visited_urls.clone(),
        next_urls_to_visit: outcome.snapshot.next_urls_to_visit.clone(),
        has_more: outcome.snapshot.has_more,
    }
}
