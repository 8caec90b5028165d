//! Link verification
//!
//! Every unique destination URL is probed once. Probes run on a fixed pool
//! of workers pulling from a shared queue, so the number of in-flight
//! requests never exceeds the configured concurrency.

mod pool;
mod probe;

pub use probe::{probe, ProbePolicy};

use crate::config::VerifierConfig;
use crate::state::CONNECTION_FAILED;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Progress hook, called with `(checked, total)` after every probe
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Outcome of probing one destination URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkVerification {
    /// The probed URL
    pub url: String,

    /// Final HTTP status, or `CONNECTION_FAILED`
    pub status: u16,

    /// Transport error text when no HTTP answer arrived
    pub error: Option<String>,
}

impl LinkVerification {
    /// Returns true for connection failures and any status >= 400
    pub fn is_broken(&self) -> bool {
        self.status == CONNECTION_FAILED || self.status >= 400
    }
}

/// Concurrent link checker
#[derive(Clone)]
pub struct Verifier {
    client: Client,
    policy: ProbePolicy,
    concurrency: usize,
    progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("policy", &self.policy)
            .field("concurrency", &self.concurrency)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl Verifier {
    /// Creates a verifier using `client` for every probe
    pub fn new(client: Client, config: &VerifierConfig) -> Self {
        Self {
            client,
            policy: ProbePolicy::from_config(config),
            concurrency: config.concurrency,
            progress: None,
        }
    }

    /// Overrides the retry policy
    pub fn with_policy(mut self, policy: ProbePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Installs a progress hook
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Configured worker count
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probes a single URL with the configured retry policy
    pub async fn check_link(&self, url: &str) -> LinkVerification {
        probe(&self.client, url, &self.policy).await
    }

    /// Probes every URL in `urls` with at most `concurrency` workers
    ///
    /// Duplicates in the input are checked once. The returned map has an
    /// entry for every distinct input URL.
    pub async fn verify(&self, urls: &[String], concurrency: usize) -> HashMap<String, LinkVerification> {
        let mut seen = HashSet::new();
        let unique: Vec<String> = urls
            .iter()
            .filter(|url| seen.insert(url.as_str()))
            .cloned()
            .collect();

        tracing::info!(
            "Verifying {} links with {} workers",
            unique.len(),
            concurrency.min(unique.len())
        );
        let start_time = std::time::Instant::now();

        let client = self.client.clone();
        let policy = self.policy;
        let results = pool::run_workers(unique, concurrency, self.progress.clone(), move |url| {
            let client = client.clone();
            async move { probe(&client, &url, &policy).await }
        })
        .await;

        let broken = results.values().filter(|v| v.is_broken()).count();
        tracing::info!(
            "Verified {} links in {:?}: {} broken",
            results.len(),
            start_time.elapsed(),
            broken
        );

        results
    }

    /// Probes every URL using the configured concurrency
    pub async fn verify_all(&self, urls: &[String]) -> HashMap<String, LinkVerification> {
        self.verify(urls, self.concurrency).await
    }
}
