use serde::Deserialize;

/// Main configuration structure for Link-Sweep
///
/// Every section falls back to its defaults, so an empty file (or no file at
/// all) yields a working service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub crawler: CrawlerConfig,
    pub verifier: VerifierConfig,
    pub batch: BatchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to
    #[serde(rename = "bind-address")]
    pub bind_address: String,

    /// Port the listener binds to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Page crawler configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Page budget used when a request does not name one
    #[serde(rename = "default-max-pages")]
    pub default_max_pages: usize,

    /// Timeout for a single page fetch (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of redirects followed per fetch
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Rewrite every discovered http:// link to https:// before use
    #[serde(rename = "upgrade-insecure")]
    pub upgrade_insecure: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            default_max_pages: 500,
            request_timeout_secs: 10,
            max_redirects: 5,
            upgrade_insecure: true,
        }
    }
}

/// Link verifier configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Number of verification workers
    pub concurrency: usize,

    /// Extra attempts after a connection-level failure
    pub retries: u32,

    /// Timeout for a single probe (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Base delay for linear backoff between attempts (milliseconds)
    #[serde(rename = "backoff-ms")]
    pub backoff_ms: u64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            concurrency: 15,
            retries: 2,
            request_timeout_secs: 8,
            backoff_ms: 1000,
        }
    }
}

/// Batch orchestration configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Page budget of a single batch step
    #[serde(rename = "sub-budget")]
    pub sub_budget: usize,

    /// Transport timeout for one remote batch step (seconds)
    #[serde(rename = "step-timeout-secs")]
    pub step_timeout_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            sub_budget: 100,
            step_timeout_secs: 300,
        }
    }
}

/// Request identification headers
///
/// Crawl and probe requests present themselves as a regular desktop browser;
/// many sites answer obvious bots with 403 regardless of the page's health.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// User-Agent header value
    pub browser: String,

    /// Accept header value
    pub accept: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            browser: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
    }
}
