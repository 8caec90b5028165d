//! URL handling module for Link-Sweep
//!
//! This module provides href normalization, seed URL preparation and
//! internal/external classification.

mod domain;
mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, is_internal};
pub use normalize::{Normalizer, SchemePolicy};

/// Turns user input into a crawlable seed URL
///
/// The input is trimmed and, when it carries no `http://` or `https://`
/// prefix, `https://` is assumed. The result must parse and have a host.
///
/// # Examples
///
/// ```
/// use link_sweep::url::prepare_seed;
///
/// let seed = prepare_seed("  example.com/start ").unwrap();
/// assert_eq!(seed.as_str(), "https://example.com/start");
/// ```
pub fn prepare_seed(raw: &str) -> Result<Url, UrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("empty URL".to_string()));
    }

    let lowered = trimmed.to_ascii_lowercase();
    let with_scheme = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;
    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}
