use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host portion, or `None` if the URL has no host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use link_sweep::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Classifies a URL as internal to `base_domain`
///
/// A URL is internal when its host equals the base domain (ports are not
/// compared) or when it has no host at all, which only happens for relative
/// leftovers. Anything else, including input that fails to parse for reasons
/// other than being relative, is external.
///
/// # Examples
///
/// ```
/// use link_sweep::url::is_internal;
///
/// assert!(is_internal("https://example.com/a", "example.com"));
/// assert!(!is_internal("https://blog.example.com/a", "example.com"));
/// ```
pub fn is_internal(url: &str, base_domain: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.eq_ignore_ascii_case(base_domain),
            None => true,
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}
