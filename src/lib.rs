//! Link-Sweep: a broken link finder for whole websites
//!
//! This crate crawls a site breadth-first from a seed URL, collects every
//! hyperlink it finds along the way, and checks each unique link for
//! reachability. Crawls can be split into resumable batches so that a large
//! page budget fits into several short, stateless requests.

pub mod batch;
pub mod check;
pub mod config;
pub mod crawler;
pub mod output;
pub mod server;
pub mod state;
pub mod url;
pub mod verifier;

use thiserror::Error;

/// Main error type for Link-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidSeed(String),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("Check step failed with status {status}: {message}")]
    StepFailed { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SweepError {
    /// Returns true if the error was caused by bad caller input
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingUrl | Self::InvalidSeed(_) | Self::UrlError(_))
    }

    /// Returns true if this error is a transport-level timeout
    ///
    /// The batch orchestrator treats these as soft failures and moves on to
    /// the next batch instead of aborting the session.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Http { source, .. } | Self::Reqwest(source) => source.is_timeout(),
            _ => false,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Link-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{AggregateResult, CheckResponse, LinkInfo};
pub use state::{CrawlPhase, PageRecord};
pub use crate::url::{extract_domain, is_internal, Normalizer, SchemePolicy};
