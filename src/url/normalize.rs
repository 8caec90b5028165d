use crate::UrlError;
use url::Url;

/// Schemes that can never be fetched and are dropped before resolution
const UNFETCHABLE_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:", "data:"];

/// How the normalizer treats plain `http` links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemePolicy {
    /// Rewrite every `http` URL to `https`
    ///
    /// This keeps `http://site/a` and `https://site/a` from being counted as
    /// two different links. A site that only answers on plain http will show
    /// its links as broken under this policy.
    #[default]
    UpgradeInsecure,

    /// Keep the scheme exactly as resolved
    Preserve,
}

impl SchemePolicy {
    /// Maps the `upgrade-insecure` configuration flag onto a policy
    pub fn from_upgrade_flag(upgrade_insecure: bool) -> Self {
        if upgrade_insecure {
            Self::UpgradeInsecure
        } else {
            Self::Preserve
        }
    }
}

/// Canonicalizes hrefs into comparable absolute URLs
///
/// # Normalization Steps
///
/// 1. Trim the href; drop `mailto:`, `tel:`, `javascript:` and `data:` links
/// 2. Resolve it against the page it was found on
/// 3. Keep only `http` and `https` results
/// 4. Remove the fragment (everything after #)
/// 5. Apply the scheme policy (upgrade `http` to `https` by default)
///
/// Normalization is idempotent: feeding a normalized URL back in (with any
/// base) returns it unchanged.
///
/// # Examples
///
/// ```
/// use link_sweep::url::Normalizer;
///
/// let normalizer = Normalizer::default();
/// let url = normalizer.normalize("/about#team", "http://example.com/index.html");
/// assert_eq!(url.as_deref(), Some("https://example.com/about"));
///
/// assert_eq!(normalizer.normalize("mailto:a@b.com", "https://example.com/"), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: SchemePolicy,
}

impl Normalizer {
    /// Creates a normalizer with the given scheme policy
    pub fn new(policy: SchemePolicy) -> Self {
        Self { policy }
    }

    /// Returns the scheme policy in effect
    pub fn policy(&self) -> SchemePolicy {
        self.policy
    }

    /// Normalizes `href` relative to `base_page_url`
    ///
    /// Returns `None` for unfetchable schemes and for anything that cannot be
    /// resolved into an absolute http(s) URL. Callers skip `None` results.
    pub fn normalize(&self, href: &str, base_page_url: &str) -> Option<String> {
        match self.try_normalize(href, base_page_url) {
            Ok(url) => Some(url.into()),
            Err(e) => {
                tracing::trace!("Dropping href {:?}: {}", href, e);
                None
            }
        }
    }

    /// Normalizes a prepared seed the same way as any discovered link
    ///
    /// This is the URL the crawl starts from and the start URL a report
    /// names, so both agree on scheme and fragment.
    pub fn normalize_seed(&self, seed: &Url) -> String {
        self.normalize(seed.as_str(), seed.as_str())
            .unwrap_or_else(|| seed.to_string())
    }

    /// Normalizes `href`, reporting why it was rejected
    pub fn try_normalize(&self, href: &str, base_page_url: &str) -> Result<Url, UrlError> {
        let href = href.trim();

        let lowered = href.to_ascii_lowercase();
        if let Some(scheme) = UNFETCHABLE_SCHEMES.iter().find(|s| lowered.starts_with(*s)) {
            return Err(UrlError::InvalidScheme(scheme.trim_end_matches(':').to_string()));
        }

        let mut url = resolve(href, base_page_url)?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        if url.host_str().is_none() {
            return Err(UrlError::MissingDomain);
        }

        url.set_fragment(None);

        if self.policy == SchemePolicy::UpgradeInsecure && url.scheme() == "http" {
            url.set_scheme("https")
                .map_err(|_| UrlError::InvalidScheme("http".to_string()))?;
        }

        Ok(url)
    }
}

/// Resolves an href that may be absolute, protocol-relative or relative
fn resolve(href: &str, base_page_url: &str) -> Result<Url, UrlError> {
    match Url::parse(href) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(base_page_url).map_err(|e| UrlError::Parse(e.to_string()))?;
            base.join(href).map_err(|e| UrlError::Parse(e.to_string()))
        }
        Err(e) => Err(UrlError::Parse(e.to_string())),
    }
}
