//! HTML parser for extracting anchors and metadata
//!
//! This module handles parsing HTML content to extract:
//! - Every `<a href>` with a human-readable label
//! - The page title
//! - The markup of anchors pointing at a given URL (for link details)

use crate::url::Normalizer;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Longest anchor text kept, in characters
pub const MAX_LINK_TEXT: usize = 100;

/// Title used when a page has none
pub const NO_TITLE: &str = "No title";

/// Label used for image-only anchors without alt text
pub const IMAGE_MARKER: &str = "IMAGE";

/// One anchor element as found in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// The raw href attribute value
    pub href: String,

    /// The resolved anchor label (see `anchor_text`)
    pub text: String,
}

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title, or `NO_TITLE`
    pub title: String,

    /// Every anchor with an href, in document order
    pub anchors: Vec<Anchor>,
}

/// An anchor that matched a link-details lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedElement {
    /// Outer HTML of the anchor
    pub tag: String,

    /// Inner HTML of the anchor's parent element
    pub context: String,
}

/// Parses HTML content and extracts anchors and the title
///
/// # Example
///
/// ```
/// use link_sweep::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.anchors[0].href, "/page");
/// assert_eq!(parsed.anchors[0].text, "Link");
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        anchors: anchors(&document).collect(),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return NO_TITLE.to_string();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Lazily yields every anchor with an href attribute
fn anchors(document: &Html) -> impl Iterator<Item = Anchor> + '_ {
    let selector = Selector::parse("a[href]").ok();

    selector
        .into_iter()
        .flat_map(move |selector| document.select(&selector).collect::<Vec<_>>())
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            Some(Anchor {
                href: href.to_string(),
                text: anchor_text(&element, href),
            })
        })
}

/// Resolves the human-readable label of an anchor
///
/// Resolution order:
/// 1. Visible text, trimmed
/// 2. For image links: the first image's alt text, or `IMAGE`
/// 3. The raw href
///
/// The result is cut to `MAX_LINK_TEXT` characters.
fn anchor_text(element: &ElementRef<'_>, href: &str) -> String {
    let mut text = element.text().collect::<String>().trim().to_string();

    if text.is_empty() {
        if let Ok(img_selector) = Selector::parse("img") {
            if let Some(img) = element.select(&img_selector).next() {
                text = match img.value().attr("alt").map(str::trim) {
                    Some(alt) if !alt.is_empty() => alt.to_string(),
                    _ => IMAGE_MARKER.to_string(),
                };
            }
        }
    }

    if text.is_empty() {
        text = href.to_string();
    }

    text.chars().take(MAX_LINK_TEXT).collect()
}

/// Finds the anchors on a page whose normalized href equals `target_url`
///
/// # Arguments
///
/// * `html` - The page content
/// * `page_url` - The page's own URL, used to resolve relative hrefs
/// * `target_url` - The normalized URL being looked up
/// * `normalizer` - The normalizer the crawl used
pub fn find_matching_anchors(
    html: &str,
    page_url: &str,
    target_url: &str,
    normalizer: &Normalizer,
) -> Vec<HighlightedElement> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|element| {
            element
                .value()
                .attr("href")
                .and_then(|href| normalizer.normalize(href, page_url))
                .is_some_and(|normalized| normalized == target_url)
        })
        .map(|element| HighlightedElement {
            tag: element.html(),
            context: element
                .parent()
                .and_then(ElementRef::wrap)
                .map(|parent| parent.inner_html())
                .unwrap_or_default(),
        })
        .collect()
}
